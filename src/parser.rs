use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::Gpx2KmlError;
use crate::gpx_types::{RawTrack, RawWaypoint};

type Result<T> = std::result::Result<T, Gpx2KmlError>;

/// Read every `<trkpt>` in a GPX document into a single `RawTrack`.
///
/// All `<trk>`/`<trkseg>` elements are flattened in document order. Name and
/// description come from the first `<trk>` that has them.
pub fn parse_gpx(xml: &str) -> Result<RawTrack> {
    let mut reader = Reader::from_str(xml);
    let mut track = RawTrack::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"trk" {
                    parse_track(&mut reader, &mut track)?;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Gpx2KmlError::XmlParse(e)),
            _ => {}
        }
    }

    tracing::debug!(
        "parsed {} raw waypoints for track {:?}",
        track.waypoints.len(),
        track.name
    );
    Ok(track)
}

/// Raw lat/lon attribute text of a `<trkpt>` start tag.
fn raw_lat_lon(e: &BytesStart<'_>) -> Result<RawWaypoint> {
    let mut point = RawWaypoint::default();

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| Gpx2KmlError::XmlParse(e.into()))?;
        let val = std::str::from_utf8(&attr.value).unwrap_or_default();
        match attr.key.local_name().as_ref() {
            b"lat" => point.lat = Some(val.to_string()),
            b"lon" => point.lon = Some(val.to_string()),
            _ => {}
        }
    }

    Ok(point)
}

/// Parse a `<trkpt>` and its children.
/// Called after receiving Event::Start for the point element.
fn parse_point<'a>(start: &BytesStart<'a>, reader: &mut Reader<&'a [u8]>) -> Result<RawWaypoint> {
    let mut point = raw_lat_lon(start)?;
    let end_name = start.name().0.to_vec();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"ele" => point.ele = Some(read_text_owned(reader, &e)?),
                b"time" => point.time = Some(read_text_owned(reader, &e)?),
                _ => {
                    // name, sym, extensions, ...
                    reader
                        .read_to_end(e.name())
                        .map_err(Gpx2KmlError::XmlParse)?;
                }
            },
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(Gpx2KmlError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(point)
}

/// Parse a `<trk>` element, appending its points to `track`.
fn parse_track<'a>(reader: &mut Reader<&'a [u8]>, track: &mut RawTrack) -> Result<()> {
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"name" => {
                    let name = read_text_owned(reader, &e)?;
                    track.name.get_or_insert(name);
                }
                b"desc" => {
                    let desc = read_text_owned(reader, &e)?;
                    track.desc.get_or_insert(desc);
                }
                b"trkseg" => parse_segment(reader, track)?,
                _ => {
                    reader
                        .read_to_end(e.name())
                        .map_err(Gpx2KmlError::XmlParse)?;
                }
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"trk" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(Gpx2KmlError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(())
}

/// Parse a `<trkseg>` element, appending its points to `track`.
fn parse_segment<'a>(reader: &mut Reader<&'a [u8]>, track: &mut RawTrack) -> Result<()> {
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"trkpt" => track.waypoints.push(parse_point(&e, reader)?),
                _ => {
                    reader
                        .read_to_end(e.name())
                        .map_err(Gpx2KmlError::XmlParse)?;
                }
            },
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"trkpt" {
                    track.waypoints.push(raw_lat_lon(&e)?);
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"trkseg" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(Gpx2KmlError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(())
}

/// Read text content of an element as an owned String.
/// Handles regular text, CDATA sections, and entity references (Event::GeneralRef).
fn read_text_owned<'a>(reader: &mut Reader<&'a [u8]>, start: &BytesStart<'_>) -> Result<String> {
    let end_name = start.name().0.to_vec();
    let mut text = String::new();

    loop {
        match reader.read_event() {
            // Text arrives in pieces split around entity references
            Ok(Event::Text(e)) => {
                text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default());
            }
            Ok(Event::CData(e)) => {
                text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default());
            }
            Ok(Event::GeneralRef(e)) => {
                // Character references (&#38; &#x26;) resolve directly
                if let Ok(Some(ch)) = e.resolve_char_ref() {
                    text.push(ch);
                } else {
                    // Only the five predefined XML entities are known in GPX
                    match std::str::from_utf8(e.as_ref()).unwrap_or_default() {
                        "amp" => text.push('&'),
                        "lt" => text.push('<'),
                        "gt" => text.push('>'),
                        "quot" => text.push('"'),
                        "apos" => text.push('\''),
                        _ => {} // undeclared entity, dropped
                    }
                }
            }
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(Gpx2KmlError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(text)
}
