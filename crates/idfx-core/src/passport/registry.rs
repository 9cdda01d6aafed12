//! Field registry: the declared set of extractable passport fields.

use std::collections::HashSet;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::RegistryError;

use super::rules::patterns::*;
use super::rules::FieldKind;

/// Declaration of one extractable attribute.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Stable identifier, e.g. `passportNumber`.
    pub key: String,
    /// Recognition patterns in trial priority order.
    ///
    /// The field text is the named group `value`, or capture group 1.
    pub patterns: Vec<Regex>,
    /// Whether absence is an error rather than a benign miss.
    pub required: bool,
    /// Normalization and validation rules.
    pub kind: FieldKind,
    /// Indices into `patterns` of restatements (such as the MRZ) whose
    /// repeat of the chosen value counts as agreement, not a competing candidate.
    pub confirming: Vec<usize>,
}

impl FieldSpec {
    /// Create an optional field from compiled patterns.
    pub fn new(key: impl Into<String>, kind: FieldKind, patterns: Vec<Regex>) -> Self {
        Self {
            key: key.into(),
            patterns,
            required: false,
            kind,
            confirming: Vec::new(),
        }
    }

    /// Create an optional field by compiling pattern sources.
    pub fn from_sources<S: AsRef<str>>(
        key: impl Into<String>,
        kind: FieldKind,
        sources: &[S],
    ) -> Result<Self, RegistryError> {
        let key = key.into();
        let patterns = sources
            .iter()
            .map(|s| Regex::new(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| RegistryError::InvalidPattern {
                key: key.clone(),
                source,
            })?;
        Ok(Self::new(key, kind, patterns))
    }

    /// Set whether the field is required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Mark the field as required.
    pub fn required(self) -> Self {
        self.with_required(true)
    }

    /// Append a lowest-priority pattern that restates the field elsewhere.
    pub fn confirmed_by(mut self, pattern: Regex) -> Self {
        self.confirming.push(self.patterns.len());
        self.patterns.push(pattern);
        self
    }

    /// Whether the pattern at `index` restates the field.
    pub fn is_confirming(&self, index: usize) -> bool {
        self.confirming.contains(&index)
    }
}

/// Constraint between two fields, checked after each is resolved on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossFieldRule {
    /// `field`'s date must not be earlier than `reference`'s date.
    NotBefore { field: String, reference: String },
}

impl CrossFieldRule {
    pub fn not_before(field: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::NotBefore {
            field: field.into(),
            reference: reference.into(),
        }
    }

    /// Keys of the fields this rule ties together.
    pub fn keys(&self) -> [&str; 2] {
        match self {
            CrossFieldRule::NotBefore { field, reference } => [field.as_str(), reference.as_str()],
        }
    }
}

/// Immutable, validated set of field specs and cross-field rules.
///
/// Built once and shared read-only between extractions.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<FieldSpec>,
    rules: Vec<CrossFieldRule>,
}

impl FieldRegistry {
    /// Build a registry, rejecting inconsistent declarations.
    pub fn new(fields: Vec<FieldSpec>, rules: Vec<CrossFieldRule>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.key.as_str()) {
                return Err(RegistryError::DuplicateKey(field.key.clone()));
            }
            if field.patterns.is_empty() {
                return Err(RegistryError::EmptyPatterns(field.key.clone()));
            }
            if let Some(index) = field.patterns.iter().position(|p| p.captures_len() < 2) {
                return Err(RegistryError::MissingCaptureGroup {
                    key: field.key.clone(),
                    index,
                });
            }
        }

        for rule in &rules {
            for key in rule.keys() {
                let field = fields
                    .iter()
                    .find(|f| f.key == key)
                    .ok_or_else(|| RegistryError::UnknownRuleField(key.to_string()))?;
                if !field.kind.is_date() {
                    return Err(RegistryError::RuleFieldNotDate {
                        key: key.to_string(),
                    });
                }
            }
        }

        debug!(
            "Built field registry with {} fields and {} rules",
            fields.len(),
            rules.len()
        );

        Ok(Self { fields, rules })
    }

    /// Declared fields in registry order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Cross-field rules.
    pub fn rules(&self) -> &[CrossFieldRule] {
        &self.rules
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Return a copy with the required flag set exactly on `keys`.
    pub fn with_required_fields<S: AsRef<str>>(&self, keys: &[S]) -> Result<Self, RegistryError> {
        for key in keys {
            if self.get(key.as_ref()).is_none() {
                return Err(RegistryError::UnknownRequiredField(key.as_ref().to_string()));
            }
        }

        let fields = self
            .fields
            .iter()
            .cloned()
            .map(|f| {
                let required = keys.iter().any(|k| k.as_ref() == f.key);
                f.with_required(required)
            })
            .collect();

        Self::new(fields, self.rules.clone())
    }

    /// Return a copy with `extra` appended after the existing fields.
    pub fn extended(&self, extra: Vec<FieldSpec>) -> Result<Self, RegistryError> {
        let mut fields = self.fields.clone();
        fields.extend(extra);
        Self::new(fields, self.rules.clone())
    }

    /// The default passport field set.
    pub fn passport() -> Result<Self, RegistryError> {
        let date = FieldKind::Date {
            not_after_current_year: false,
        };

        let fields = vec![
            FieldSpec::new(
                "passportNumber",
                FieldKind::Code { min_len: 5 },
                vec![PASSPORT_NUMBER.clone(), PASSPORT_NUMBER_NEXT_LINE.clone()],
            )
            .confirmed_by(MRZ_DOCUMENT_NUMBER.clone())
            .required(),
            FieldSpec::new(
                "surname",
                FieldKind::Name,
                vec![SURNAME.clone(), SURNAME_NEXT_LINE.clone()],
            )
            .confirmed_by(MRZ_SURNAME.clone())
            .required(),
            FieldSpec::new(
                "givenName",
                FieldKind::Name,
                vec![GIVEN_NAME.clone(), GIVEN_NAME_NEXT_LINE.clone()],
            )
            .confirmed_by(MRZ_GIVEN_NAME.clone()),
            FieldSpec::new(
                "nationality",
                FieldKind::Name,
                vec![NATIONALITY.clone(), NATIONALITY_NEXT_LINE.clone()],
            ),
            FieldSpec::new(
                "dateOfBirth",
                FieldKind::Date {
                    not_after_current_year: true,
                },
                vec![
                    DATE_OF_BIRTH.clone(),
                    DATE_OF_BIRTH_NEXT_LINE.clone(),
                    DOB.clone(),
                ],
            ),
            FieldSpec::new(
                "placeOfBirth",
                FieldKind::Text,
                vec![PLACE_OF_BIRTH.clone(), PLACE_OF_BIRTH_NEXT_LINE.clone()],
            ),
            FieldSpec::new("sex", FieldKind::Sex, vec![SEX.clone(), SEX_NEXT_LINE.clone()]),
            FieldSpec::new(
                "dateOfIssue",
                date,
                vec![DATE_OF_ISSUE.clone(), DATE_OF_ISSUE_NEXT_LINE.clone()],
            ),
            FieldSpec::new(
                "dateOfExpiry",
                date,
                vec![DATE_OF_EXPIRY.clone(), DATE_OF_EXPIRY_NEXT_LINE.clone()],
            ),
            FieldSpec::new(
                "placeOfIssue",
                FieldKind::Text,
                vec![PLACE_OF_ISSUE.clone(), PLACE_OF_ISSUE_NEXT_LINE.clone()],
            ),
            FieldSpec::new(
                "fileNumber",
                FieldKind::Code { min_len: 1 },
                vec![FILE_NUMBER.clone(), FILE_NUMBER_NEXT_LINE.clone()],
            ),
        ];

        let rules = vec![CrossFieldRule::not_before("dateOfExpiry", "dateOfIssue")];

        Self::new(fields, rules)
    }
}

lazy_static! {
    static ref PASSPORT_REGISTRY: Arc<FieldRegistry> =
        Arc::new(FieldRegistry::passport().unwrap());
}

/// Shared handle to the default passport registry, built on first use.
pub fn passport_registry() -> Arc<FieldRegistry> {
    Arc::clone(&PASSPORT_REGISTRY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_passport_registry_order() {
        let registry = FieldRegistry::passport().unwrap();
        let keys: Vec<&str> = registry.fields().iter().map(|f| f.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "passportNumber",
                "surname",
                "givenName",
                "nationality",
                "dateOfBirth",
                "placeOfBirth",
                "sex",
                "dateOfIssue",
                "dateOfExpiry",
                "placeOfIssue",
                "fileNumber",
            ]
        );
        assert!(registry.get("passportNumber").unwrap().required);
        assert!(!registry.get("fileNumber").unwrap().required);
    }

    #[test]
    fn test_mrz_patterns_confirm() {
        let registry = FieldRegistry::passport().unwrap();
        let number = registry.get("passportNumber").unwrap();
        assert_eq!(number.confirming, vec![2]);
        assert!(number.is_confirming(2));
        assert!(!number.is_confirming(0));
        assert!(registry.get("dateOfBirth").unwrap().confirming.is_empty());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let a = FieldSpec::from_sources("code", FieldKind::Text, &[r"code:(\w+)"]).unwrap();
        let b = FieldSpec::from_sources("code", FieldKind::Text, &[r"alt:(\w+)"]).unwrap();
        let err = FieldRegistry::new(vec![a, b], vec![]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateKey(k) if k == "code"));
    }

    #[test]
    fn test_empty_patterns_rejected() {
        let spec = FieldSpec::new("empty", FieldKind::Text, vec![]);
        let err = FieldRegistry::new(vec![spec], vec![]).unwrap_err();
        assert!(matches!(err, RegistryError::EmptyPatterns(_)));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = FieldSpec::from_sources("bad", FieldKind::Text, &[r"(unclosed"]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPattern { .. }));
    }

    #[test]
    fn test_pattern_without_group_rejected() {
        let spec = FieldSpec::from_sources("flat", FieldKind::Text, &[r"label: \w+"]).unwrap();
        let err = FieldRegistry::new(vec![spec], vec![]).unwrap_err();
        assert!(matches!(err, RegistryError::MissingCaptureGroup { index: 0, .. }));
    }

    #[test]
    fn test_rule_validation() {
        let issued = FieldSpec::from_sources("issued", FieldKind::Text, &[r"i:(\S+)"]).unwrap();
        let expires = FieldSpec::from_sources(
            "expires",
            FieldKind::Date {
                not_after_current_year: false,
            },
            &[r"e:(\S+)"],
        )
        .unwrap();

        let err = FieldRegistry::new(
            vec![issued.clone(), expires.clone()],
            vec![CrossFieldRule::not_before("expires", "missing")],
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownRuleField(k) if k == "missing"));

        let err = FieldRegistry::new(
            vec![issued, expires],
            vec![CrossFieldRule::not_before("expires", "issued")],
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::RuleFieldNotDate { key } if key == "issued"));
    }

    #[test]
    fn test_with_required_fields() {
        let registry = FieldRegistry::passport().unwrap();
        let relaxed = registry.with_required_fields(&["dateOfBirth"]).unwrap();
        assert!(!relaxed.get("passportNumber").unwrap().required);
        assert!(relaxed.get("dateOfBirth").unwrap().required);

        let err = registry.with_required_fields(&["visaNumber"]).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownRequiredField(_)));
    }

    #[test]
    fn test_extended_rejects_duplicate() {
        let registry = FieldRegistry::passport().unwrap();
        let dup = FieldSpec::from_sources("sex", FieldKind::Sex, &[r"gender:(\w)"]).unwrap();
        assert!(registry.extended(vec![dup]).is_err());
    }

    #[test]
    fn test_shared_registry_is_same_instance() {
        let a = passport_registry();
        let b = passport_registry();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
