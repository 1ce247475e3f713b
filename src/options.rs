use serde::Deserialize;

use crate::simplify::DEFAULT_EPSILON;

/// Options accepted by the JS entry points.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Simplification tolerance in degrees (default: `DEFAULT_EPSILON`)
    #[serde(default)]
    pub epsilon: Option<f64>,

    /// Include elevation as the 3rd GeoJSON coordinate value (default: true)
    #[serde(default = "default_true")]
    pub include_elevation: bool,

    /// Include track name and description in output (default: true)
    #[serde(default = "default_true")]
    pub include_metadata: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            epsilon: None,
            include_elevation: true,
            include_metadata: true,
        }
    }
}

impl ConvertOptions {
    pub fn simplification(&self) -> SimplificationConfig {
        SimplificationConfig::new(self.epsilon)
    }
}

/// Tolerance threaded through every stage of the simplifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplificationConfig {
    pub epsilon: f64,
}

impl SimplificationConfig {
    /// Use `epsilon` if it is a finite number, otherwise `DEFAULT_EPSILON`.
    pub fn new(epsilon: Option<f64>) -> Self {
        match epsilon {
            Some(e) if e.is_finite() => Self { epsilon: e },
            Some(e) => {
                tracing::warn!("ignoring non-finite epsilon {e}, using {DEFAULT_EPSILON}");
                Self::default()
            }
            None => Self::default(),
        }
    }
}

impl Default for SimplificationConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let opts: ConvertOptions = serde_json::from_str("{}").unwrap();
        assert!(opts.epsilon.is_none());
        assert!(opts.include_elevation);
        assert!(opts.include_metadata);
        assert_eq!(opts.simplification().epsilon, DEFAULT_EPSILON);
    }

    #[test]
    fn test_camel_case_fields() {
        let opts: ConvertOptions =
            serde_json::from_str(r#"{"epsilon": 0.0003, "includeElevation": false}"#).unwrap();
        assert_eq!(opts.epsilon, Some(0.0003));
        assert!(!opts.include_elevation);
        assert!(opts.include_metadata);
    }

    #[test]
    fn test_non_finite_epsilon_falls_back() {
        assert_eq!(
            SimplificationConfig::new(Some(f64::NAN)).epsilon,
            DEFAULT_EPSILON
        );
        assert_eq!(
            SimplificationConfig::new(Some(f64::INFINITY)).epsilon,
            DEFAULT_EPSILON
        );
        assert_eq!(SimplificationConfig::new(Some(-0.5)).epsilon, -0.5);
    }
}
