//! Form field descriptors and validation rules

/// How a field accepts and displays input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Digits and `-` only
    Numeric,
    /// Rendered masked
    Secret,
}

impl FieldKind {
    /// Whether a typed character is accepted by this kind of field
    pub fn accepts(self, c: char) -> bool {
        match self {
            FieldKind::Numeric => c.is_ascii_digit() || c == '-',
            FieldKind::Text | FieldKind::Secret => !c.is_control(),
        }
    }
}

/// A single-field validation predicate with its failure message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    MinLength { min: usize, message: String },
    MaxLength { max: usize, message: String },
    Email { message: String },
}

impl Rule {
    pub fn min_length(min: usize, message: &str) -> Self {
        Rule::MinLength {
            min,
            message: message.to_string(),
        }
    }

    pub fn max_length(max: usize, message: &str) -> Self {
        Rule::MaxLength {
            max,
            message: message.to_string(),
        }
    }

    pub fn email(message: &str) -> Self {
        Rule::Email {
            message: message.to_string(),
        }
    }

    /// Returns the failure message if `value` violates this rule.
    ///
    /// Lengths are counted in characters of the raw value.
    pub fn check(&self, value: &str) -> Option<&str> {
        let passed = match self {
            Rule::MinLength { min, .. } => value.chars().count() >= *min,
            Rule::MaxLength { max, .. } => value.chars().count() <= *max,
            Rule::Email { .. } => is_valid_email(value),
        };
        if passed {
            None
        } else {
            Some(self.message())
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Rule::MinLength { message, .. }
            | Rule::MaxLength { message, .. }
            | Rule::Email { message } => message,
        }
    }
}

/// Syntactic email check: `local@domain` where the domain has at least one
/// dot and no empty labels.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}

/// A rule that reads two fields and reports against `field`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossFieldRule {
    Equals {
        field: String,
        other: String,
        message: String,
    },
}

impl CrossFieldRule {
    pub fn equals(field: &str, other: &str, message: &str) -> Self {
        CrossFieldRule::Equals {
            field: field.to_string(),
            other: other.to_string(),
            message: message.to_string(),
        }
    }

    /// Field the failure is attributed to
    pub fn reported_field(&self) -> &str {
        match self {
            CrossFieldRule::Equals { field, .. } => field,
        }
    }

    /// Every field this rule reads
    pub fn referenced_fields(&self) -> [&str; 2] {
        match self {
            CrossFieldRule::Equals { field, other, .. } => [field.as_str(), other.as_str()],
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CrossFieldRule::Equals { message, .. } => message,
        }
    }
}

/// Declarative description of one form field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub kind: FieldKind,
    pub rules: Vec<Rule>,
    /// Hard cap on typed characters
    pub max_input_len: Option<usize>,
    pub is_multiline: bool,
    /// Field that receives focus when Enter is pressed here
    pub next_on_submit: Option<String>,
}

impl FieldSpec {
    /// Create a single-line text field
    pub fn text(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::Text)
    }

    /// Create a numeric field (digits and dashes)
    pub fn numeric(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::Numeric)
    }

    /// Create a masked field
    pub fn secret(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, FieldKind::Secret)
    }

    fn with_kind(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            placeholder: String::new(),
            kind,
            rules: Vec::new(),
            max_input_len: None,
            is_multiline: false,
            next_on_submit: None,
        }
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn max_input_len(mut self, max: usize) -> Self {
        self.max_input_len = Some(max);
        self
    }

    pub fn multiline(mut self) -> Self {
        self.is_multiline = true;
        self
    }

    pub fn next(mut self, field: &str) -> Self {
        self.next_on_submit = Some(field.to_string());
        self
    }

    /// First failing rule's message, if any
    pub fn first_failure(&self, value: &str) -> Option<&str> {
        self.rules.iter().find_map(|rule| rule.check(value))
    }

    /// Value as it should appear on screen
    pub fn display_value(&self, value: &str) -> String {
        match self.kind {
            FieldKind::Secret => "•".repeat(value.chars().count()),
            FieldKind::Text | FieldKind::Numeric => value.to_string(),
        }
    }
}
