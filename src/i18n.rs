//! UI translations
//!
//! Built once from the config and handed to the app; there is no global
//! language state.

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Dutch,
}

impl Language {
    /// Parse a language code, falling back to English
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(|c| c.trim().to_ascii_lowercase()).as_deref() {
            Some("nl") | Some("nl-nl") | Some("nl-be") => Language::Dutch,
            Some("en") | None => Language::English,
            Some(other) => {
                tracing::warn!("Unsupported language '{other}', using English");
                Language::English
            }
        }
    }
}

/// Every translatable UI string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    Forms,
    Timesheet,
    Submissions,
    ChoiceOk,
    ChoiceNotOk,
    ChoiceNa,
    Comment,
    AnswerPlaceholder,
    SignedBy,
    NoForms,
    NoSubmissions,
    Offline,
    Submitted,
    TimesheetSaved,
    RetryHint,
    Discarded,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Translations {
    language: Language,
}

impl Translations {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn get(&self, text: Text) -> &'static str {
        match self.language {
            Language::English => english(text),
            Language::Dutch => dutch(text),
        }
    }
}

fn english(text: Text) -> &'static str {
    match text {
        Text::Forms => "Forms",
        Text::Timesheet => "Timesheet",
        Text::Submissions => "Submissions",
        Text::ChoiceOk => "OK",
        Text::ChoiceNotOk => "Not OK",
        Text::ChoiceNa => "N/A",
        Text::Comment => "Comment",
        Text::AnswerPlaceholder => "Type your answer...",
        Text::SignedBy => "Signed by",
        Text::NoForms => "No forms available.",
        Text::NoSubmissions => "No submissions yet.",
        Text::Offline => "Backend unreachable, showing cached data only",
        Text::Submitted => "Form submitted",
        Text::TimesheetSaved => "Timesheet entry saved",
        Text::RetryHint => "Press Ctrl+S to retry.",
        Text::Discarded => "Form discarded",
    }
}

fn dutch(text: Text) -> &'static str {
    match text {
        Text::Forms => "Formulieren",
        Text::Timesheet => "Urenstaat",
        Text::Submissions => "Inzendingen",
        Text::ChoiceOk => "OK",
        Text::ChoiceNotOk => "Niet OK",
        Text::ChoiceNa => "N.v.t.",
        Text::Comment => "Opmerking",
        Text::AnswerPlaceholder => "Typ je antwoord...",
        Text::SignedBy => "Ondertekend door",
        Text::NoForms => "Geen formulieren beschikbaar.",
        Text::NoSubmissions => "Nog geen inzendingen.",
        Text::Offline => "Server onbereikbaar, alleen lokale gegevens",
        Text::Submitted => "Formulier verzonden",
        Text::TimesheetSaved => "Uren opgeslagen",
        Text::RetryHint => "Druk Ctrl+S om opnieuw te proberen.",
        Text::Discarded => "Formulier verworpen",
    }
}
