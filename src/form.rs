/// The join-us form as typed; `year` is the selected option value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub year: String,
    pub major: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Year,
    Major,
}

impl ContactForm {
    /// Fields that need fixing before the form can be accepted, in form order.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<Field> {
        let mut invalid = Vec::new();

        if self.name.trim().is_empty() {
            invalid.push(Field::Name);
        }

        if !is_email(self.email.trim()) {
            invalid.push(Field::Email);
        }

        if self.year.is_empty() {
            invalid.push(Field::Year);
        }

        if self.major.trim().is_empty() {
            invalid.push(Field::Major);
        }

        invalid
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.invalid_fields().is_empty()
    }
}

/// `local@domain.tld`, no whitespace and exactly one `@`.
fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // some dot must have text on both sides
    domain
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len())
}
