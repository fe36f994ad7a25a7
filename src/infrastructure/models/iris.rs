//! Rule-based iris classifier
//!
//! A small, dependency-free model used as the builtin catalog entry and as a
//! reference implementation of the model contract.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::{JsonSchema, MlModel, ModelError, ModelResult, SchemaRef, parse_input};

/// Exclusive bounds accepted for each measurement, in centimetres
const SEPAL_LENGTH: (f64, f64) = (5.0, 8.0);
const SEPAL_WIDTH: (f64, f64) = (2.0, 6.0);
const PETAL_LENGTH: (f64, f64) = (1.0, 6.8);
const PETAL_WIDTH: (f64, f64) = (0.0, 3.0);

const DESCRIPTION: &str =
    "Predicts the species of an iris flower from its sepal and petal measurements.";

/// Measurements of one flower
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IrisInput {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl IrisInput {
    /// Check every measurement against its bounds
    pub fn validate(&self) -> ModelResult<()> {
        check_range("sepal_length", self.sepal_length, SEPAL_LENGTH)?;
        check_range("sepal_width", self.sepal_width, SEPAL_WIDTH)?;
        check_range("petal_length", self.petal_length, PETAL_LENGTH)?;
        check_range("petal_width", self.petal_width, PETAL_WIDTH)?;
        Ok(())
    }
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> ModelResult<()> {
    if value > min && value < max {
        Ok(())
    } else {
        Err(ModelError::schema_validation(format!(
            "{field} must be greater than {min} and less than {max}, got {value}"
        )))
    }
}

/// Iris species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    #[serde(rename = "Iris setosa")]
    Setosa,
    #[serde(rename = "Iris versicolor")]
    Versicolor,
    #[serde(rename = "Iris virginica")]
    Virginica,
}

impl Species {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Setosa => "Iris setosa",
            Self::Versicolor => "Iris versicolor",
            Self::Virginica => "Iris virginica",
        }
    }
}

/// Prediction for one flower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrisOutput {
    pub species: Species,
}

/// Decision-stump iris classifier over petal measurements
#[derive(Debug, Clone, Default)]
pub struct IrisModel {
    _private: (),
}

impl IrisModel {
    pub const QUALIFIED_NAME: &'static str = "iris_model";

    pub fn new() -> Self {
        Self::default()
    }

    /// Classify validated measurements
    pub fn classify(&self, input: &IrisInput) -> Species {
        if input.petal_length < 2.45 {
            Species::Setosa
        } else if input.petal_width < 1.75 {
            Species::Versicolor
        } else {
            Species::Virginica
        }
    }

    fn input_schema_document() -> JsonSchema {
        let measurement = |(min, max): (f64, f64)| {
            json!({"type": "number", "exclusiveMinimum": min, "exclusiveMaximum": max})
        };

        JsonSchema::object("IrisInput")
            .with_property("sepal_length", measurement(SEPAL_LENGTH), true)
            .with_property("sepal_width", measurement(SEPAL_WIDTH), true)
            .with_property("petal_length", measurement(PETAL_LENGTH), true)
            .with_property("petal_width", measurement(PETAL_WIDTH), true)
    }

    fn output_schema_document() -> JsonSchema {
        let species: Vec<&str> = [Species::Setosa, Species::Versicolor, Species::Virginica]
            .iter()
            .map(Species::as_str)
            .collect();

        JsonSchema::object("IrisOutput").with_property(
            "species",
            json!({"type": "string", "enum": species}),
            true,
        )
    }
}

impl MlModel for IrisModel {
    fn display_name(&self) -> ModelResult<String> {
        Ok("Iris Model".to_string())
    }

    fn qualified_name(&self) -> ModelResult<String> {
        Ok(Self::QUALIFIED_NAME.to_string())
    }

    fn description(&self) -> ModelResult<String> {
        Ok(DESCRIPTION.to_string())
    }

    fn version(&self) -> ModelResult<String> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }

    fn input_schema(&self) -> ModelResult<Option<SchemaRef>> {
        Ok(Some(Self::input_schema_document().into_ref()))
    }

    fn output_schema(&self) -> ModelResult<Option<SchemaRef>> {
        Ok(Some(Self::output_schema_document().into_ref()))
    }

    fn predict(&self, input: Value) -> ModelResult<Value> {
        let input: IrisInput = parse_input(input)?;
        input.validate()?;

        let output = IrisOutput {
            species: self.classify(&input),
        };

        serde_json::to_value(output).map_err(|e| ModelError::internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurements(petal_length: f64, petal_width: f64) -> Value {
        json!({
            "sepal_length": 6.0,
            "sepal_width": 4.0,
            "petal_length": petal_length,
            "petal_width": petal_width,
        })
    }

    #[test]
    fn test_predicts_each_species() {
        let model = IrisModel::new();

        assert_eq!(
            model.predict(measurements(1.4, 0.2)).unwrap(),
            json!({"species": "Iris setosa"})
        );
        assert_eq!(
            model.predict(measurements(4.5, 1.4)).unwrap(),
            json!({"species": "Iris versicolor"})
        );
        assert_eq!(
            model.predict(measurements(5.8, 2.2)).unwrap(),
            json!({"species": "Iris virginica"})
        );
    }

    #[test]
    fn test_rejects_out_of_range_measurement() {
        let model = IrisModel::new();
        let error = model.predict(measurements(7.5, 1.0)).unwrap_err();

        assert!(matches!(error, ModelError::SchemaValidation { .. }));
        assert!(error.to_string().contains("petal_length"));
    }

    #[test]
    fn test_rejects_wrong_types() {
        let model = IrisModel::new();
        let mut input = measurements(2.0, 1.0);
        input["petal_width"] = json!("asdf");

        assert!(matches!(
            model.predict(input).unwrap_err(),
            ModelError::SchemaValidation { .. }
        ));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let model = IrisModel::new();
        let mut input = measurements(2.0, 1.0);
        input["correlation_id"] = json!("abc");

        assert!(model.predict(input).is_err());
    }

    #[test]
    fn test_metadata() {
        let model = IrisModel::new();
        let metadata = model.metadata().unwrap();

        assert_eq!(metadata.details.qualified_name, "iris_model");
        assert_eq!(metadata.details.display_name, "Iris Model");

        let input = metadata.input_schema.unwrap();
        assert_eq!(input["title"], "IrisInput");
        assert_eq!(input["properties"]["petal_width"]["exclusiveMaximum"], 3.0);
        assert_eq!(input["required"].as_array().unwrap().len(), 4);

        let output = metadata.output_schema.unwrap();
        assert_eq!(
            output["properties"]["species"]["enum"],
            json!(["Iris setosa", "Iris versicolor", "Iris virginica"])
        );
    }
}
