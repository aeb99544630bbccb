//! Passenger form collection and validation.
//!
//! A [`PassengerForm`] holds field values exactly as the user typed them.
//! [`PassengerForm::collect`] parses and range-checks every field, gathering
//! all problems before failing, so nothing invalid reaches the encoder.

use serde::{Deserialize, Serialize};

use crate::entities::PassengerInput;
use crate::enums::{PassengerClass, Port, Sex};
use crate::errors::{ValidationError, ValidationErrors};
use crate::title::{extract_title, normalize_name};

pub const DEFAULT_CLASS: PassengerClass = PassengerClass::Third;
pub const DEFAULT_SEX: Sex = Sex::Male;
pub const DEFAULT_AGE: f64 = 28.0;
pub const DEFAULT_FARE: f64 = 10.5;
pub const MAX_AGE: f64 = 100.0;
pub const MAX_RELATIVES: u8 = 10;

/// Training-time defaults supplied alongside the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormDefaults {
    /// Substituted when age is entered as 0.
    pub median_age: f64,
    /// Used when no port of embarkation is given.
    pub default_embarked: Port,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            median_age: DEFAULT_AGE,
            default_embarked: Port::Southampton,
        }
    }
}

/// Raw form values. `None` (or a blank string) means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerForm {
    pub name: Option<String>,
    pub passenger_class: Option<String>,
    pub sex: Option<String>,
    pub age: Option<String>,
    pub siblings_spouses: Option<String>,
    pub parents_children: Option<String>,
    pub fare: Option<String>,
    pub embarked: Option<String>,
    pub has_cabin: Option<String>,
}

/// Field keys, in form order. Used in validation errors and prompts.
pub mod fields {
    pub const NAME: &str = "name";
    pub const PASSENGER_CLASS: &str = "passenger_class";
    pub const SEX: &str = "sex";
    pub const AGE: &str = "age";
    pub const SIBLINGS_SPOUSES: &str = "siblings_spouses";
    pub const PARENTS_CHILDREN: &str = "parents_children";
    pub const FARE: &str = "fare";
    pub const EMBARKED: &str = "embarked";
    pub const HAS_CABIN: &str = "has_cabin";

    pub const ALL: [&str; 9] = [
        NAME,
        PASSENGER_CLASS,
        SEX,
        AGE,
        SIBLINGS_SPOUSES,
        PARENTS_CHILDREN,
        FARE,
        EMBARKED,
        HAS_CABIN,
    ];
}

impl PassengerForm {
    /// Set a field by its key. Returns `false` for unknown keys.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            fields::NAME => &mut self.name,
            fields::PASSENGER_CLASS => &mut self.passenger_class,
            fields::SEX => &mut self.sex,
            fields::AGE => &mut self.age,
            fields::SIBLINGS_SPOUSES => &mut self.siblings_spouses,
            fields::PARENTS_CHILDREN => &mut self.parents_children,
            fields::FARE => &mut self.fare,
            fields::EMBARKED => &mut self.embarked,
            fields::HAS_CABIN => &mut self.has_cabin,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }

    /// Validate every field and build a [`PassengerInput`].
    ///
    /// # Errors
    ///
    /// Returns all validation problems at once; the list is never empty.
    pub fn collect(&self, defaults: &FormDefaults) -> Result<PassengerInput, ValidationErrors> {
        let mut errors = Vec::new();

        let name = normalize_name(present(self.name.as_ref()).unwrap_or_default());
        if name.is_empty() {
            errors.push(ValidationError::new(fields::NAME, "Name cannot be empty."));
        }

        let passenger_class = parse_or(
            self.passenger_class.as_ref(),
            DEFAULT_CLASS,
            fields::PASSENGER_CLASS,
            "Passenger class must be 1, 2 or 3.",
            &mut errors,
        );

        let sex = parse_or(
            self.sex.as_ref(),
            DEFAULT_SEX,
            fields::SEX,
            "Sex must be 'male' or 'female'.",
            &mut errors,
        );

        let age = parse_number(self.age.as_ref(), DEFAULT_AGE, fields::AGE, "Age", &mut errors)
            .filter(|age| {
                let ok = (0.0..=MAX_AGE).contains(age);
                if !ok {
                    errors.push(ValidationError::new(
                        fields::AGE,
                        "Age must be between 0 and 100.",
                    ));
                }
                ok
            })
            .map(|age| if age == 0.0 { defaults.median_age } else { age });

        let siblings_spouses = parse_relatives(
            self.siblings_spouses.as_ref(),
            fields::SIBLINGS_SPOUSES,
            "Siblings/spouses aboard",
            &mut errors,
        );
        let parents_children = parse_relatives(
            self.parents_children.as_ref(),
            fields::PARENTS_CHILDREN,
            "Parents/children aboard",
            &mut errors,
        );

        let fare = parse_number(self.fare.as_ref(), DEFAULT_FARE, fields::FARE, "Fare", &mut errors)
            .filter(|fare| {
                let ok = *fare >= 0.0;
                if !ok {
                    errors.push(ValidationError::new(fields::FARE, "Fare cannot be negative."));
                }
                ok
            });

        let embarked = parse_or(
            self.embarked.as_ref(),
            defaults.default_embarked,
            fields::EMBARKED,
            "Port of embarkation must be S, C or Q.",
            &mut errors,
        );

        let has_cabin = match present(self.has_cabin.as_ref()) {
            None => Some(false),
            Some(raw) => parse_yes_no(raw).or_else(|| {
                errors.push(ValidationError::new(
                    fields::HAS_CABIN,
                    "Cabin must be 'yes' or 'no'.",
                ));
                None
            }),
        };

        match (
            passenger_class,
            sex,
            age,
            siblings_spouses,
            parents_children,
            fare,
            embarked,
            has_cabin,
        ) {
            (
                Some(passenger_class),
                Some(sex),
                Some(age),
                Some(siblings_spouses),
                Some(parents_children),
                Some(fare),
                Some(embarked),
                Some(has_cabin),
            ) if errors.is_empty() => {
                let title = extract_title(&name);
                tracing::debug!(%name, %title, "passenger form collected");
                Ok(PassengerInput {
                    name,
                    passenger_class,
                    sex,
                    age,
                    siblings_spouses,
                    parents_children,
                    fare,
                    embarked,
                    has_cabin,
                    title,
                })
            }
            _ => Err(ValidationErrors { errors }),
        }
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_or<T: std::str::FromStr>(
    value: Option<&String>,
    default: T,
    field: &'static str,
    message: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<T> {
    match present(value) {
        None => Some(default),
        Some(raw) => raw.parse().ok().or_else(|| {
            errors.push(ValidationError::new(field, message));
            None
        }),
    }
}

fn parse_number(
    value: Option<&String>,
    default: f64,
    field: &'static str,
    label: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<f64> {
    match present(value) {
        None => Some(default),
        Some(raw) => match raw.parse::<f64>() {
            Ok(number) if number.is_finite() => Some(number),
            _ => {
                errors.push(ValidationError::new(
                    field,
                    format!("{label} must be a number."),
                ));
                None
            }
        },
    }
}

fn parse_relatives(
    value: Option<&String>,
    field: &'static str,
    label: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<u8> {
    match present(value) {
        None => Some(0),
        Some(raw) => match raw.parse::<u8>() {
            Ok(count) if count <= MAX_RELATIVES => Some(count),
            _ => {
                errors.push(ValidationError::new(
                    field,
                    format!("{label} must be a whole number between 0 and {MAX_RELATIVES}."),
                ));
                None
            }
        },
    }
}

fn parse_yes_no(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::enums::Title;

    fn form(pairs: &[(&str, &str)]) -> PassengerForm {
        let mut form = PassengerForm::default();
        for (field, value) in pairs {
            assert!(form.set(field, *value), "unknown field {field}");
        }
        form
    }

    #[test]
    fn collects_documented_example() {
        let input = form(&[
            ("name", "Cumings, Mrs. John Bradley"),
            ("age", "29"),
            ("sex", "female"),
            ("passenger_class", "1"),
            ("fare", "100.0"),
            ("embarked", "S"),
        ])
        .collect(&FormDefaults::default())
        .expect("valid form");

        assert_eq!(input.age, 29.0);
        assert_eq!(input.sex, Sex::Female);
        assert_eq!(input.passenger_class, PassengerClass::First);
        assert_eq!(input.fare, 100.0);
        assert_eq!(input.embarked, Port::Southampton);
        assert_eq!(input.title, Title::Mrs);
        assert!(!input.has_cabin);
    }

    #[test]
    fn blank_fields_take_defaults() {
        let defaults = FormDefaults {
            median_age: 30.0,
            default_embarked: Port::Cherbourg,
        };
        let input = form(&[("name", "Doe, Mr. John"), ("fare", "  ")])
            .collect(&defaults)
            .expect("valid form");

        assert_eq!(input.passenger_class, DEFAULT_CLASS);
        assert_eq!(input.sex, DEFAULT_SEX);
        assert_eq!(input.age, DEFAULT_AGE);
        assert_eq!(input.fare, DEFAULT_FARE);
        assert_eq!(input.embarked, Port::Cherbourg);
        assert_eq!(input.siblings_spouses, 0);
    }

    #[test]
    fn zero_age_is_replaced_by_median() {
        let defaults = FormDefaults {
            median_age: 28.0,
            default_embarked: Port::Southampton,
        };
        let input = form(&[("name", "Doe, Mr. John"), ("age", "0")])
            .collect(&defaults)
            .expect("valid form");
        assert_eq!(input.age, 28.0);
    }

    #[test]
    fn negative_age_is_rejected() {
        let errors = form(&[("name", "Doe, Mr. John"), ("age", "-5")])
            .collect(&FormDefaults::default())
            .expect_err("age -5 must be rejected");
        assert_eq!(errors.errors[0].field, fields::AGE);
        assert_eq!(errors.errors.len(), 1);
    }

    #[test]
    fn reports_every_problem_at_once() {
        let errors = form(&[
            ("name", "   "),
            ("age", "101"),
            ("fare", "-1"),
            ("embarked", "X"),
            ("siblings_spouses", "11"),
            ("has_cabin", "maybe"),
        ])
        .collect(&FormDefaults::default())
        .expect_err("form is invalid");

        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                fields::NAME,
                fields::AGE,
                fields::SIBLINGS_SPOUSES,
                fields::FARE,
                fields::EMBARKED,
                fields::HAS_CABIN
            ]
        );
        assert!(errors.to_string().contains("Name cannot be empty."));
    }

    #[rstest]
    #[case("yes", true)]
    #[case("Y", true)]
    #[case("true", true)]
    #[case("no", false)]
    #[case("N", false)]
    fn parses_cabin_answers(#[case] raw: &str, #[case] expected: bool) {
        let input = form(&[("name", "Doe, Mr. John"), ("has_cabin", raw)])
            .collect(&FormDefaults::default())
            .expect("valid form");
        assert_eq!(input.has_cabin, expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("NaN")]
    #[case("inf")]
    fn rejects_non_finite_numbers(#[case] raw: &str) {
        let errors = form(&[("name", "Doe, Mr. John"), ("fare", raw)])
            .collect(&FormDefaults::default())
            .expect_err("fare must be finite");
        assert_eq!(errors.iter().map(|e| e.field).collect::<Vec<_>>(), [fields::FARE]);
    }

    #[rstest]
    #[case("3xyz")]
    #[case("1zz")]
    #[case("2foo")]
    #[case("1nd")]
    #[case("4")]
    #[case("0")]
    fn rejects_unknown_passenger_class(#[case] raw: &str) {
        let errors = form(&[("name", "Doe, Mr. John"), ("passenger_class", raw)])
            .collect(&FormDefaults::default())
            .expect_err("class must be 1, 2 or 3");
        assert_eq!(
            errors.iter().map(|e| e.field).collect::<Vec<_>>(),
            [fields::PASSENGER_CLASS]
        );
    }

    #[test]
    fn zero_fare_is_accepted() {
        let input = form(&[("name", "Doe, Mr. John"), ("fare", "0")])
            .collect(&FormDefaults::default())
            .expect("zero fare is in range");
        assert_eq!(input.fare, 0.0);
    }

    #[test]
    fn unknown_field_is_not_set() {
        let mut form = PassengerForm::default();
        assert!(!form.set("ticket", "A/5 21171"));
        assert_eq!(form, PassengerForm::default());
    }
}
