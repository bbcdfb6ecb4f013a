//! Form control domains and the schema the UI renders from.
//!
//! The numeric domains are fixed. The sex chooser is seeded from the fitted
//! sex encoder so the UI can only offer labels the encoder can transform.

use serde::{Deserialize, Serialize};

use crate::encoding::LabelEncoder;
use crate::error::PredictError;
use crate::features::PenguinMeasurements;

/// Identifies one of the four bounded numeric inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measurement {
    CulmenLength,
    CulmenDepth,
    FlipperLength,
    BodyMass,
}

impl Measurement {
    /// All numeric inputs, in feature-column order.
    pub const ALL: [Self; 4] = [
        Self::CulmenLength,
        Self::CulmenDepth,
        Self::FlipperLength,
        Self::BodyMass,
    ];

    /// Field name as it appears in submitted input.
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::CulmenLength => "culmen_length_mm",
            Self::CulmenDepth => "culmen_depth_mm",
            Self::FlipperLength => "flipper_length_mm",
            Self::BodyMass => "body_mass_g",
        }
    }

    /// Human-readable label for the form.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CulmenLength => "Culmen Length",
            Self::CulmenDepth => "Culmen Depth",
            Self::FlipperLength => "Flipper Length",
            Self::BodyMass => "Body Mass",
        }
    }

    pub const fn unit(&self) -> &'static str {
        match self {
            Self::BodyMass => "g",
            _ => "mm",
        }
    }

    pub const fn help(&self) -> &'static str {
        match self {
            Self::CulmenLength => "Length of the bill from base to tip.",
            Self::CulmenDepth => "Depth of the bill at its widest point.",
            Self::FlipperLength => "Length of the flipper.",
            Self::BodyMass => "Body mass of the penguin.",
        }
    }

    /// Slider domain: `[min, max]`, default and step.
    pub const fn domain(&self) -> Domain {
        match self {
            Self::CulmenLength => Domain::new(30.0, 60.0, 45.0, 0.1),
            Self::CulmenDepth => Domain::new(13.0, 22.0, 17.0, 0.1),
            Self::FlipperLength => Domain::new(170.0, 240.0, 200.0, 1.0),
            Self::BodyMass => Domain::new(2500.0, 6500.0, 4000.0, 50.0),
        }
    }

    /// Read this field from a submission.
    pub fn value_of(&self, input: &PenguinMeasurements) -> f64 {
        match self {
            Self::CulmenLength => input.culmen_length_mm,
            Self::CulmenDepth => input.culmen_depth_mm,
            Self::FlipperLength => input.flipper_length_mm,
            Self::BodyMass => input.body_mass_g,
        }
    }
}

/// Bounded slider domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl Domain {
    pub const fn new(min: f64, max: f64, default: f64, step: f64) -> Self {
        Self {
            min,
            max,
            default,
            step,
        }
    }

    /// Inclusive bounds check. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Decimal places implied by the step (0.1 → 1, 1 → 0, 50 → 0).
    pub fn decimals(&self) -> usize {
        let mut step = self.step.abs();
        let mut decimals = 0;
        while decimals < 6 && step > 0.0 && (step - step.round()).abs() > 1e-9 {
            step *= 10.0;
            decimals += 1;
        }
        decimals
    }

    /// Format a value at the step's precision.
    pub fn format(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.decimals())
    }
}

/// A numeric slider as sent to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericControl {
    pub field: Measurement,
    pub label: String,
    pub unit: String,
    pub help: String,
    #[serde(flatten)]
    pub domain: Domain,
}

impl From<Measurement> for NumericControl {
    fn from(field: Measurement) -> Self {
        Self {
            field,
            label: field.label().to_string(),
            unit: field.unit().to_string(),
            help: field.help().to_string(),
            domain: field.domain(),
        }
    }
}

/// A categorical chooser as sent to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceControl {
    pub label: String,
    pub help: String,
    /// Legal options, in encoder order.
    pub options: Vec<String>,
    /// Initially selected option (the first one).
    pub default: String,
}

/// Everything the UI needs to render the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    /// The four sliders, in feature-column order.
    pub numeric: Vec<NumericControl>,
    /// The sex chooser.
    pub sex: ChoiceControl,
    /// Caption of the submit trigger.
    pub trigger_label: String,
}

impl FormSchema {
    /// Build the schema, seeding the sex options from the fitted encoder.
    pub fn new(sex_encoder: &LabelEncoder) -> Self {
        let options = sex_encoder.classes().to_vec();
        let default = options.first().cloned().unwrap_or_default();
        Self {
            numeric: Measurement::ALL.into_iter().map(NumericControl::from).collect(),
            sex: ChoiceControl {
                label: "Sex".to_string(),
                help: "Sex of the penguin.".to_string(),
                options,
                default,
            },
            trigger_label: "Predict Penguin Species".to_string(),
        }
    }

    /// The submission the untouched form produces.
    pub fn defaults(&self) -> PenguinMeasurements {
        let d = |m: Measurement| m.domain().default;
        PenguinMeasurements {
            culmen_length_mm: d(Measurement::CulmenLength),
            culmen_depth_mm: d(Measurement::CulmenDepth),
            flipper_length_mm: d(Measurement::FlipperLength),
            body_mass_g: d(Measurement::BodyMass),
            sex: self.sex.default.clone(),
        }
    }

    /// Check a submission against the control domains.
    ///
    /// Sliders cannot leave their bounds, but values arriving over IPC are
    /// arbitrary JSON and are checked here before reaching the pipeline.
    /// Off-step values inside the bounds are accepted.
    pub fn validate(&self, input: &PenguinMeasurements) -> Result<(), PredictError> {
        for control in &self.numeric {
            let value = control.field.value_of(input);
            if !control.domain.contains(value) {
                return Err(PredictError::InvalidInput {
                    field: control.field.field_name(),
                    message: format!(
                        "{value} is outside [{}, {}]",
                        control.domain.min, control.domain.max
                    ),
                });
            }
        }
        if !self.sex.options.iter().any(|o| *o == input.sex) {
            return Err(PredictError::UnknownCategory {
                value: input.sex.clone(),
                known: self.sex.options.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FormSchema {
        let enc = LabelEncoder::new(vec!["FEMALE".into(), "MALE".into()]).unwrap();
        FormSchema::new(&enc)
    }

    #[test]
    fn test_domains_match_form() {
        let d = Measurement::CulmenLength.domain();
        assert_eq!((d.min, d.max, d.default, d.step), (30.0, 60.0, 45.0, 0.1));
        let d = Measurement::CulmenDepth.domain();
        assert_eq!((d.min, d.max, d.default, d.step), (13.0, 22.0, 17.0, 0.1));
        let d = Measurement::FlipperLength.domain();
        assert_eq!((d.min, d.max, d.default, d.step), (170.0, 240.0, 200.0, 1.0));
        let d = Measurement::BodyMass.domain();
        assert_eq!((d.min, d.max, d.default, d.step), (2500.0, 6500.0, 4000.0, 50.0));
    }

    #[test]
    fn test_sex_options_follow_encoder_order() {
        let enc = LabelEncoder::new(vec!["MALE".into(), "FEMALE".into(), ".".into()]).unwrap();
        let schema = FormSchema::new(&enc);
        assert_eq!(schema.sex.options, enc.classes());
        assert_eq!(schema.sex.default, "MALE");
    }

    #[test]
    fn test_defaults_are_valid() {
        let schema = schema();
        let input = schema.defaults();
        assert_eq!(input.culmen_length_mm, 45.0);
        assert_eq!(input.body_mass_g, 4000.0);
        assert_eq!(input.sex, "FEMALE");
        assert!(schema.validate(&input).is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let schema = schema();
        let mut input = schema.defaults();
        input.flipper_length_mm = 240.0;
        input.body_mass_g = 2500.0;
        assert!(schema.validate(&input).is_ok());

        input.flipper_length_mm = 240.5;
        let err = schema.validate(&input).unwrap_err();
        assert!(matches!(
            err,
            PredictError::InvalidInput {
                field: "flipper_length_mm",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_sex_rejected() {
        let schema = schema();
        let mut input = schema.defaults();
        input.sex = "UNKNOWN".into();
        assert!(matches!(
            schema.validate(&input),
            Err(PredictError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_step_precision() {
        assert_eq!(Measurement::CulmenLength.domain().decimals(), 1);
        assert_eq!(Measurement::FlipperLength.domain().decimals(), 0);
        assert_eq!(Measurement::BodyMass.domain().decimals(), 0);
        assert_eq!(Measurement::CulmenDepth.domain().format(17.0), "17.0");
        assert_eq!(Measurement::BodyMass.domain().format(4050.0), "4050");
    }

    #[test]
    fn test_schema_json_flattens_domain() {
        let json = serde_json::to_value(schema()).unwrap();
        let first = &json["numeric"][0];
        assert_eq!(first["field"], "culmen_length_mm");
        assert_eq!(first["min"], 30.0);
        assert_eq!(first["step"], 0.1);
    }
}
