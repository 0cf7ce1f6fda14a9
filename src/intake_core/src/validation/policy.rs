//! Form policies: ordered rule chains per field, evaluated with multi-error
//! accumulation.
//!
//! A policy maps each form field to the rules it must satisfy. Validation
//! trims every value first, then runs the field's whole rule chain - a
//! missing value does not short-circuit the remaining checks, so one field
//! can collect several messages, the way field-validation libraries
//! accumulate errors.

use crate::validation::rules::{self, RuleViolation, ViolationKind};

/// One validation rule in a field's chain.
///
/// The defensive rules deliberately report the same generic message for every
/// trigger so the response never reveals which token tripped them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required,
    LengthBetween { min: usize, max: usize },
    MinLength { min: usize },
    EmailFormat,
    PhoneFormat,
    NoSqlKeywords,
    NoXssMarkup,
}

impl Rule {
    /// Check one trimmed value, producing a labeled message on failure.
    pub fn check(&self, label: &str, value: &str) -> Result<(), RuleViolation> {
        match self {
            Rule::Required => {
                if rules::is_blank(value) {
                    return Err(RuleViolation::new(
                        ViolationKind::Missing,
                        format!("{label} is required"),
                    ));
                }
            }
            Rule::LengthBetween { min, max } => {
                if !rules::length_between(value, *min, *max) {
                    return Err(RuleViolation::new(
                        ViolationKind::Length,
                        format!("{label} must be {min}-{max} characters"),
                    ));
                }
            }
            Rule::MinLength { min } => {
                if value.chars().count() < *min {
                    return Err(RuleViolation::new(
                        ViolationKind::Length,
                        format!("{label} must be at least {min} characters"),
                    ));
                }
            }
            Rule::EmailFormat => {
                if !rules::matches_email(value) {
                    return Err(RuleViolation::new(
                        ViolationKind::Format,
                        "Invalid email address",
                    ));
                }
            }
            Rule::PhoneFormat => {
                if !rules::matches_phone(value) {
                    return Err(RuleViolation::new(
                        ViolationKind::Format,
                        "Invalid phone number format",
                    ));
                }
            }
            Rule::NoSqlKeywords => {
                if rules::contains_sql_keyword(value) {
                    return Err(RuleViolation::new(
                        ViolationKind::Blacklist,
                        "Invalid characters or keywords detected",
                    ));
                }
            }
            Rule::NoXssMarkup => {
                if rules::contains_xss_markup(value) {
                    return Err(RuleViolation::new(
                        ViolationKind::Blacklist,
                        "Invalid HTML or script content detected",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// The rule chain bound to one named form field.
#[derive(Debug, Clone)]
pub struct FieldPolicy {
    pub name: &'static str,
    pub label: &'static str,
    pub rules: Vec<Rule>,
}

/// Validation failures keyed by field name, in policy order. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, field: &str, message: String) {
        if let Some((_, messages)) = self.entries.iter_mut().find(|(name, _)| name == field) {
            messages.push(message);
        } else {
            self.entries.push((field.to_string(), vec![message]));
        }
    }

    /// Messages for one field, in the order its rules reported them.
    pub fn messages_for(&self, field: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, messages)| (name.as_str(), messages.as_slice()))
    }
}

/// Field values that passed a policy, trimmed and ready for downstream use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    values: Vec<(&'static str, String)>,
}

impl ValidatedFields {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value.as_str())
    }

    /// The trimmed value for a field the policy is known to carry, or an
    /// empty string for an unknown field name.
    pub fn field(&self, field: &str) -> String {
        self.get(field).unwrap_or_default().to_string()
    }
}

/// An ordered set of field policies for one form.
#[derive(Debug, Clone)]
pub struct FormPolicy {
    fields: Vec<FieldPolicy>,
}

impl FormPolicy {
    /// The login form: username and password.
    pub fn login() -> Self {
        Self {
            fields: vec![
                FieldPolicy {
                    name: "username",
                    label: "Username",
                    rules: vec![
                        Rule::Required,
                        Rule::LengthBetween { min: 3, max: 80 },
                        Rule::NoSqlKeywords,
                        Rule::NoXssMarkup,
                    ],
                },
                FieldPolicy {
                    name: "password",
                    label: "Password",
                    rules: vec![Rule::Required, Rule::MinLength { min: 6 }],
                },
            ],
        }
    }

    /// The contact form: name, email, phone, and message.
    pub fn contact() -> Self {
        Self {
            fields: vec![
                FieldPolicy {
                    name: "name",
                    label: "Name",
                    rules: vec![
                        Rule::Required,
                        Rule::LengthBetween { min: 2, max: 100 },
                        Rule::NoSqlKeywords,
                        Rule::NoXssMarkup,
                    ],
                },
                FieldPolicy {
                    name: "email",
                    label: "Email",
                    rules: vec![Rule::Required, Rule::EmailFormat, Rule::NoSqlKeywords],
                },
                FieldPolicy {
                    name: "phone",
                    label: "Phone",
                    rules: vec![Rule::Required, Rule::PhoneFormat, Rule::NoSqlKeywords],
                },
                FieldPolicy {
                    name: "message",
                    label: "Message",
                    rules: vec![
                        Rule::Required,
                        Rule::LengthBetween { min: 10, max: 1000 },
                        Rule::NoSqlKeywords,
                        Rule::NoXssMarkup,
                    ],
                },
            ],
        }
    }

    pub fn fields(&self) -> &[FieldPolicy] {
        &self.fields
    }

    /// Validate raw `(field, value)` pairs against this policy.
    ///
    /// Values are trimmed before any rule runs. Every rule in every chain is
    /// evaluated and every failure collected; the submission is accepted only
    /// when no field produced an error. A field absent from `raw` is treated
    /// as empty.
    pub fn validate(&self, raw: &[(&str, &str)]) -> Result<ValidatedFields, FieldErrors> {
        let mut errors = FieldErrors::default();
        let mut values = Vec::with_capacity(self.fields.len());

        for field in &self.fields {
            let value = raw
                .iter()
                .find(|(name, _)| *name == field.name)
                .map(|(_, value)| value.trim())
                .unwrap_or_default();

            for rule in &field.rules {
                if let Err(violation) = rule.check(field.label, value) {
                    if violation.kind == ViolationKind::Blacklist {
                        // Potential-abuse signal; the field value itself is
                        // deliberately not logged.
                        tracing::warn!(field = field.name, "defensive blacklist rejected input");
                    }
                    errors.push(field.name, violation.message);
                }
            }

            values.push((field.name, value.to_string()));
        }

        if errors.is_empty() {
            Ok(ValidatedFields { values })
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_raw<'a>(username: &'a str, password: &'a str) -> Vec<(&'a str, &'a str)> {
        vec![("username", username), ("password", password)]
    }

    #[test]
    fn valid_login_passes_and_is_trimmed() {
        let fields = FormPolicy::login()
            .validate(&login_raw("  Ahmed  ", "ahmed123"))
            .expect("valid login form");
        assert_eq!(fields.get("username"), Some("Ahmed"));
        assert_eq!(fields.get("password"), Some("ahmed123"));
    }

    #[test]
    fn missing_value_accumulates_multiple_errors() {
        let errors = FormPolicy::login()
            .validate(&login_raw("", "secret1"))
            .unwrap_err();
        // Required and the length rule both fire on the empty value.
        assert_eq!(
            errors.messages_for("username"),
            &[
                "Username is required".to_string(),
                "Username must be 3-80 characters".to_string(),
            ]
        );
        assert!(errors.messages_for("password").is_empty());
    }

    #[test]
    fn absent_field_is_treated_as_empty() {
        let errors = FormPolicy::login()
            .validate(&[("username", "Ahmed")])
            .unwrap_err();
        assert_eq!(
            errors.messages_for("password"),
            &[
                "Password is required".to_string(),
                "Password must be at least 6 characters".to_string(),
            ]
        );
    }

    #[test]
    fn sql_injection_username_gets_generic_message() {
        let errors = FormPolicy::login()
            .validate(&login_raw("admin' OR '1'='1", "whatever"))
            .unwrap_err();
        assert_eq!(
            errors.messages_for("username"),
            &["Invalid characters or keywords detected".to_string()]
        );
    }

    #[test]
    fn short_password_is_rejected() {
        let errors = FormPolicy::login()
            .validate(&login_raw("Ahmed", "abc"))
            .unwrap_err();
        assert_eq!(
            errors.messages_for("password"),
            &["Password must be at least 6 characters".to_string()]
        );
    }

    #[test]
    fn valid_contact_passes() {
        let raw = vec![
            ("name", "Jane Doe"),
            ("email", "jane@example.com"),
            ("phone", "+1 (555) 123-4567"),
            ("message", "I would like to hear back about my order."),
        ];
        let fields = FormPolicy::contact().validate(&raw).expect("valid contact");
        assert_eq!(fields.get("email"), Some("jane@example.com"));
    }

    #[test]
    fn contact_rejects_markup_in_name() {
        let raw = vec![
            ("name", "<script>alert(1)</script>"),
            ("email", "jane@example.com"),
            ("phone", "+1 (555) 123-4567"),
            ("message", "I would like to hear back about my order."),
        ];
        let errors = FormPolicy::contact().validate(&raw).unwrap_err();
        assert_eq!(
            errors.messages_for("name"),
            &["Invalid HTML or script content detected".to_string()]
        );
    }

    #[test]
    fn contact_surname_containing_a_token_substring_passes() {
        let raw = vec![
            ("name", "Andrew Anderson"),
            ("email", "andrew@example.com"),
            ("phone", "0123456789"),
            ("message", "Please call me back tomorrow morning."),
        ];
        assert!(FormPolicy::contact().validate(&raw).is_ok());
    }

    #[test]
    fn contact_message_with_whole_word_token_fails() {
        let raw = vec![
            ("name", "Jane Doe"),
            ("email", "jane@example.com"),
            ("phone", "0123456789"),
            ("message", "between this and that there is a gap"),
        ];
        let errors = FormPolicy::contact().validate(&raw).unwrap_err();
        assert_eq!(
            errors.messages_for("message"),
            &["Invalid characters or keywords detected".to_string()]
        );
    }

    #[test]
    fn whole_form_is_rejected_on_any_field_failure() {
        let raw = vec![
            ("name", "Jane Doe"),
            ("email", "not-an-email"),
            ("phone", "+1 (555) 123-4567"),
            ("message", "I would like to hear back about my order."),
        ];
        let errors = FormPolicy::contact().validate(&raw).unwrap_err();
        assert_eq!(
            errors.messages_for("email"),
            &["Invalid email address".to_string()]
        );
        assert!(errors.messages_for("name").is_empty());
    }
}
