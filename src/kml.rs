use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::Gpx2KmlError;
use crate::track::{SimplifiedTrack, TrackPoint};

type Result<T> = std::result::Result<T, Gpx2KmlError>;

struct LineStyle {
    id: &'static str,
    /// aabbggrr
    color: &'static str,
    width: u32,
}

impl LineStyle {
    const fn new(id: &'static str, color: &'static str) -> Self {
        Self {
            id,
            color,
            width: 4,
        }
    }
}

/// Assigned to tracks in order, wrapping around.
const STYLES: [LineStyle; 7] = [
    LineStyle::new("red", "C81400FF"),
    LineStyle::new("blue", "C8FF7800"),
    LineStyle::new("pink", "96F0FF14"),
    LineStyle::new("green", "C878FF00"),
    LineStyle::new("orange", "C81478FF"),
    LineStyle::new("dark_green", "96008C14"),
    LineStyle::new("pink2", "C8A078F0"),
];

const KML_NAMESPACES: [(&str, &str); 4] = [
    ("xmlns", "http://www.opengis.net/kml/2.2"),
    ("xmlns:gx", "http://www.google.com/kml/ext/2.2"),
    ("xmlns:kml", "http://www.opengis.net/kml/2.2"),
    ("xmlns:atom", "http://www.w3.org/2005/Atom"),
];

/// Render simplified tracks as a KML document, one styled placemark per track.
///
/// Tracks with no points are left out; a single-point track becomes a
/// `<Point>` placemark. Style assignment follows the input index either way.
pub fn render_kml(tracks: &[SimplifiedTrack]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("kml").with_attributes(KML_NAMESPACES),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("Document")))?;

    text_element(&mut writer, "name", "Converted from GPX file")?;
    writer.write_event(Event::Start(BytesStart::new("description")))?;
    writer.write_event(Event::CData(BytesCData::new(
        "<p>Converted with <b>gpx2kml-wasm</b></p>",
    )))?;
    writer.write_event(Event::End(BytesEnd::new("description")))?;
    text_element(&mut writer, "visibility", "1")?;
    text_element(&mut writer, "open", "1")?;

    for style in &STYLES {
        write_style(&mut writer, style)?;
    }

    writer.write_event(Event::Start(BytesStart::new("Folder")))?;
    text_element(&mut writer, "name", "Tracks")?;
    text_element(&mut writer, "description", "A list of tracks")?;
    text_element(&mut writer, "visibility", "1")?;
    text_element(&mut writer, "open", "0")?;

    for (i, track) in tracks.iter().enumerate() {
        if track.points.is_empty() {
            tracing::debug!("track {i} has no points, leaving it out of KML");
            continue;
        }
        write_placemark(&mut writer, i, track)?;
    }

    writer.write_event(Event::End(BytesEnd::new("Folder")))?;
    writer.write_event(Event::End(BytesEnd::new("Document")))?;
    writer.write_event(Event::End(BytesEnd::new("kml")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_style<W: Write>(writer: &mut Writer<W>, style: &LineStyle) -> Result<()> {
    let mut start = BytesStart::new("Style");
    start.push_attribute(("id", style.id));
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Start(BytesStart::new("LineStyle")))?;
    text_element(writer, "color", style.color)?;
    text_element(writer, "width", &style.width.to_string())?;
    writer.write_event(Event::End(BytesEnd::new("LineStyle")))?;
    writer.write_event(Event::End(BytesEnd::new("Style")))?;
    Ok(())
}

fn write_placemark<W: Write>(
    writer: &mut Writer<W>,
    index: usize,
    track: &SimplifiedTrack,
) -> Result<()> {
    let style = &STYLES[index % STYLES.len()];
    let name = track
        .name
        .clone()
        .unwrap_or_else(|| format!("Track {}", index + 1));
    let desc = track.desc.as_deref().unwrap_or("Simplified GPS track");

    writer.write_event(Event::Start(BytesStart::new("Placemark")))?;
    text_element(writer, "visibility", "0")?;
    text_element(writer, "open", "0")?;
    text_element(writer, "styleUrl", &format!("#{}", style.id))?;
    text_element(writer, "name", &name)?;
    text_element(writer, "description", desc)?;

    let geometry = if track.points.len() == 1 {
        "Point"
    } else {
        "LineString"
    };
    writer.write_event(Event::Start(BytesStart::new(geometry)))?;
    if geometry == "LineString" {
        text_element(writer, "extrude", "1")?;
        text_element(writer, "tessellate", "1")?;
    }
    text_element(writer, "altitudeMode", "clampToGround")?;
    text_element(writer, "coordinates", &format_coordinates(&track.points))?;
    writer.write_event(Event::End(BytesEnd::new(geometry)))?;

    writer.write_event(Event::End(BytesEnd::new("Placemark")))?;
    Ok(())
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// One `lon,lat,ele` tuple per line.
pub fn format_coordinates(points: &[TrackPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{},{},{}", p.lon, p.lat, p.ele))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: Option<&str>, points: Vec<TrackPoint>) -> SimplifiedTrack {
        SimplifiedTrack {
            name: name.map(str::to_string),
            desc: None,
            original_points: points.len(),
            points,
            epsilon: 1e-7,
            rejected_waypoints: 0,
        }
    }

    fn line() -> Vec<TrackPoint> {
        vec![
            TrackPoint::new(139.0, 35.0, 10.0),
            TrackPoint::new(139.5, 35.25, 12.5),
        ]
    }

    #[test]
    fn test_format_coordinates() {
        assert_eq!(format_coordinates(&line()), "139,35,10\n139.5,35.25,12.5");
        assert_eq!(format_coordinates(&[]), "");
    }

    #[test]
    fn test_document_structure() {
        let kml = render_kml(&[track(Some("Run"), line())]).unwrap();

        assert!(kml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(kml.contains(r#"<kml xmlns="http://www.opengis.net/kml/2.2""#));
        assert!(kml.contains("<name>Converted from GPX file</name>"));
        assert!(kml.contains("<![CDATA[<p>Converted with <b>gpx2kml-wasm</b></p>]]>"));
        assert!(kml.contains("<name>Tracks</name>"));
        assert!(kml.contains("<name>Run</name>"));
        assert!(kml.contains("<styleUrl>#red</styleUrl>"));
        assert!(kml.contains("<altitudeMode>clampToGround</altitudeMode>"));
        assert!(kml.contains("139,35,10\n139.5,35.25,12.5"));
        assert_eq!(kml.matches("<Style id=").count(), 7);
        assert_eq!(kml.matches("<Placemark>").count(), 1);
    }

    #[test]
    fn test_styles_wrap_around() {
        let tracks: Vec<SimplifiedTrack> = (0..9).map(|_| track(None, line())).collect();
        let kml = render_kml(&tracks).unwrap();

        assert_eq!(kml.matches("<Placemark>").count(), 9);
        assert_eq!(kml.matches("<styleUrl>#red</styleUrl>").count(), 2);
        assert_eq!(kml.matches("<styleUrl>#blue</styleUrl>").count(), 2);
        assert!(kml.contains("<name>Track 9</name>"));
    }

    #[test]
    fn test_empty_and_single_point_tracks() {
        let tracks = vec![
            track(Some("Empty"), Vec::new()),
            track(Some("Dot"), vec![TrackPoint::new(1.0, 2.0, 3.0)]),
        ];
        let kml = render_kml(&tracks).unwrap();

        assert!(!kml.contains("<name>Empty</name>"));
        assert!(kml.contains("<Point>"));
        assert!(!kml.contains("<LineString>"));
        // second input track keeps the second style
        assert!(kml.contains("<styleUrl>#blue</styleUrl>"));
    }

    #[test]
    fn test_names_are_escaped() {
        let kml = render_kml(&[track(Some("Hill & <Dale>"), line())]).unwrap();
        assert!(kml.contains("<name>Hill &amp; &lt;Dale&gt;</name>"));
    }
}
