// ============================================================
// Layer 3 - SoilSample Domain Type
// ============================================================
// One agronomic measurement: three soil nutrients plus four
// climate readings. This is the unit the model trains on and
// the unit the service predicts for.
//
// Every feature has a name. The positional vector the forest
// consumes is produced in exactly one place (to_vector), in
// the order listed by FEATURE_NAMES, so a caller can never
// hand the model a shuffled row.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// Number of numeric features per sample
pub const NUM_FEATURES: usize = 7;

/// Column / JSON key names, in the order the model consumes them.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "N",
    "P",
    "K",
    "temperature",
    "humidity",
    "ph",
    "rainfall",
];

/// A single feature row in model order
pub type FeatureVector = [f64; NUM_FEATURES];

/// Soil nutrient and climate readings for one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    /// Nitrogen content ratio
    #[serde(rename = "N")]
    pub nitrogen: f64,

    /// Phosphorus content ratio
    #[serde(rename = "P")]
    pub phosphorus: f64,

    /// Potassium content ratio
    #[serde(rename = "K")]
    pub potassium: f64,

    /// Temperature in degrees Celsius
    pub temperature: f64,

    /// Relative humidity in %
    pub humidity: f64,

    /// Soil pH
    pub ph: f64,

    /// Rainfall in mm
    pub rainfall: f64,
}

impl SoilSample {
    /// Flatten into the positional vector the forest consumes.
    /// Order matches FEATURE_NAMES.
    pub fn to_vector(&self) -> FeatureVector {
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    /// Rebuild a sample from a vector in FEATURE_NAMES order.
    pub fn from_vector(v: FeatureVector) -> Self {
        let [nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall] = v;
        Self { nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall }
    }

    /// The fixed sample the trainer predicts after fitting as a smoke check.
    pub fn reference() -> Self {
        Self {
            nitrogen:    90.0,
            phosphorus:  42.0,
            potassium:   43.0,
            temperature: 20.88,
            humidity:    82.0,
            ph:          6.5,
            rainfall:    202.94,
        }
    }
}

/// A SoilSample paired with the crop grown on it (training data only).
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample {
    pub sample: SoilSample,
    pub label:  String,
}

impl LabeledSample {
    pub fn new(sample: SoilSample, label: impl Into<String>) -> Self {
        Self { sample, label: label.into() }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_follows_feature_names() {
        let s = SoilSample::from_vector([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(s.nitrogen, 1.0);
        assert_eq!(s.potassium, 3.0);
        assert_eq!(s.rainfall, 7.0);
        assert_eq!(s.to_vector(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_json_keys_match_feature_names() {
        let json = serde_json::to_value(SoilSample::reference()).unwrap();
        let obj  = json.as_object().unwrap();
        assert_eq!(obj.len(), NUM_FEATURES);
        for name in FEATURE_NAMES {
            assert!(obj.contains_key(name), "missing key {name}");
        }
    }

    #[test]
    fn test_deserialize_from_request_shape() {
        let s: SoilSample = serde_json::from_str(
            r#"{"N":30,"P":20,"K":10,"temperature":28,"humidity":65,"ph":6.5,"rainfall":200}"#,
        ).unwrap();
        assert_eq!(s.to_vector(), [30.0, 20.0, 10.0, 28.0, 65.0, 6.5, 200.0]);
    }
}
