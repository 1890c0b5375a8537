//! Form field value objects

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Decimal number kept as typed so partial input like "7." survives
    Decimal(String),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, is_multiline: bool) -> Self {
        Self::text_with_value(name, label, String::new(), is_multiline)
    }

    /// Create a new text field with initial value
    pub fn text_with_value(name: &str, label: &str, value: String, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(value),
            is_multiline,
        }
    }

    /// Create a new decimal field
    pub fn decimal(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Decimal(String::new()),
            is_multiline: false,
        }
    }

    /// Get the raw text of the field
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) | FieldValue::Decimal(s) => s,
        }
    }

    /// Parse a decimal field; accepts ',' as the separator too
    pub fn as_decimal(&self) -> Option<f32> {
        match &self.value {
            FieldValue::Decimal(s) => s.replace(',', ".").parse().ok(),
            FieldValue::Text(_) => None,
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) => s.push(c),
            FieldValue::Decimal(s) => {
                let is_separator = c == '.' || c == ',';
                let has_separator = s.contains(['.', ',']);
                if c.is_ascii_digit() || (is_separator && !has_separator) {
                    s.push(c);
                }
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Decimal(s) => {
                s.pop();
            }
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Decimal(s) => s.clear(),
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        self.as_text().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_accepts_anything() {
        let mut field = FormField::text("signed_by", "Signed by", false);
        for c in "J. Doe".chars() {
            field.push_char(c);
        }
        assert_eq!(field.as_text(), "J. Doe");
        assert_eq!(field.as_decimal(), None);
    }

    #[test]
    fn test_decimal_filters_input() {
        let mut field = FormField::decimal("hours", "Hours");
        for c in "7a.5.2".chars() {
            field.push_char(c);
        }
        assert_eq!(field.as_text(), "7.52");
        assert_eq!(field.as_decimal(), Some(7.52));
    }

    #[test]
    fn test_decimal_comma_separator() {
        let mut field = FormField::decimal("hours", "Hours");
        for c in "3,5".chars() {
            field.push_char(c);
        }
        assert_eq!(field.as_decimal(), Some(3.5));
    }

    #[test]
    fn test_empty_decimal_is_none() {
        let field = FormField::decimal("hours", "Hours");
        assert_eq!(field.as_decimal(), None);
    }

    #[test]
    fn test_pop_and_clear() {
        let mut field = FormField::text_with_value("d", "D", "abc".to_string(), true);
        field.pop_char();
        assert_eq!(field.display_value(), "ab");
        field.clear();
        assert_eq!(field.as_text(), "");
        assert!(field.is_multiline);
    }
}
