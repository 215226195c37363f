use serde_json::Value;
use std::fmt;

pub const UNKNOWN: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_INSTRUCTION: &str = "No specific instructions provided";

/// The parts of a feature's `properties` that get printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertProperties {
    pub event: Option<String>,
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFeature {
    pub properties: AlertProperties,
}

impl AlertFeature {
    /// Read a feature from the raw GeoJSON value.
    ///
    /// Never fails. A feature without a `properties` object reads as one with
    /// every field missing, `null` counts as missing and any other non-string
    /// value is kept as its JSON text.
    pub fn from_value(feature: &Value) -> AlertFeature {
        let props = feature.get("properties");
        let field = |key: &str| match props.and_then(|p| p.get(key)) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        AlertFeature {
            properties: AlertProperties {
                event: field("event"),
                area_desc: field("areaDesc"),
                severity: field("severity"),
                description: field("description"),
                instruction: field("instruction"),
            },
        }
    }

    pub fn event(&self) -> &str {
        self.properties.event.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn area(&self) -> &str {
        self.properties.area_desc.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn severity(&self) -> &str {
        self.properties.severity.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn description(&self) -> &str {
        self.properties
            .description
            .as_deref()
            .unwrap_or(NO_DESCRIPTION)
    }

    pub fn instruction(&self) -> &str {
        self.properties
            .instruction
            .as_deref()
            .unwrap_or(NO_INSTRUCTION)
    }
}

impl fmt::Display for AlertFeature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nEvent: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}\n",
            self.event(),
            self.area(),
            self.severity(),
            self.description(),
            self.instruction()
        )
    }
}

pub fn format_alert(feature: &AlertFeature) -> String {
    feature.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_get_defaults() {
        let feature = AlertFeature::from_value(&json!({
            "properties": {"event": "Flood Warning", "areaDesc": "Queens", "severity": "Severe"}
        }));
        let text = format_alert(&feature);
        assert!(text.contains("Event: Flood Warning"));
        assert!(text.contains("Area: Queens"));
        assert!(text.contains("Severity: Severe"));
        assert!(text.contains("Description: No description available"));
        assert!(text.contains("Instructions: No specific instructions provided"));
    }

    #[test]
    fn exact_template() {
        let feature = AlertFeature::from_value(&json!({
            "properties": {
                "event": "Wind Advisory",
                "areaDesc": "Suffolk; Nassau",
                "severity": "Moderate",
                "description": "Gusts up to 50 mph.",
                "instruction": "Secure outdoor objects."
            }
        }));
        assert_eq!(
            format_alert(&feature),
            "\nEvent: Wind Advisory\nArea: Suffolk; Nassau\nSeverity: Moderate\n\
             Description: Gusts up to 50 mph.\nInstructions: Secure outdoor objects.\n"
        );
    }

    #[test]
    fn values_are_inserted_verbatim() {
        let feature = AlertFeature::from_value(&json!({
            "properties": {"description": "  line one\nline two <b>  ", "event": ""}
        }));
        let text = format_alert(&feature);
        assert!(text.contains("Description:   line one\nline two <b>  \n"));
        assert!(text.contains("Event: \n"));
    }

    #[test]
    fn null_and_non_string_fields() {
        let feature = AlertFeature::from_value(&json!({
            "properties": {"instruction": null, "severity": 3}
        }));
        assert_eq!(feature.instruction(), NO_INSTRUCTION);
        assert_eq!(feature.severity(), "3");
    }

    #[test]
    fn feature_without_properties_uses_all_defaults() {
        for value in [json!({}), json!({"properties": null}), json!("not an object")] {
            let feature = AlertFeature::from_value(&value);
            assert_eq!(feature, AlertFeature::default());
            assert_eq!(
                format_alert(&feature),
                "\nEvent: Unknown\nArea: Unknown\nSeverity: Unknown\n\
                 Description: No description available\n\
                 Instructions: No specific instructions provided\n"
            );
        }
    }

    #[test]
    fn formatting_is_deterministic() {
        let value = json!({"properties": {"event": "Heat Advisory", "areaDesc": "Bronx"}});
        let first = format_alert(&AlertFeature::from_value(&value));
        let second = format_alert(&AlertFeature::from_value(&value));
        assert_eq!(first, second);
    }
}
