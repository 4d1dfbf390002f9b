//! Output-language detection for LLM prompts
//!
//! The language the openers should be written in is guessed from the user's
//! own input: script checks for Hebrew and Arabic first, then keyword overlap
//! for a handful of European languages, falling back to English.

use std::fmt;

/// Language the model is told to answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectedLanguage {
    Hebrew,
    Arabic,
    French,
    Spanish,
    German,
    Italian,
    Portuguese,
    English,
}

impl DetectedLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hebrew => "Hebrew",
            Self::Arabic => "Arabic",
            Self::French => "French",
            Self::Spanish => "Spanish",
            Self::German => "German",
            Self::Italian => "Italian",
            Self::Portuguese => "Portuguese",
            Self::English => "English",
        }
    }
}

impl fmt::Display for DetectedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword tables, in tie-break priority order.
///
/// Words are lower-case and matched as substrings, so none of them may occur
/// inside common English job titles or company descriptions.
const KEYWORDS: &[(DetectedLanguage, &[&str])] = &[
    (
        DetectedLanguage::French,
        &[
            "directeur",
            "directrice",
            "entreprise",
            "société",
            "croissance",
            "responsable",
            "ventes",
            "recrutement",
        ],
    ),
    (
        DetectedLanguage::Spanish,
        &[
            "empresa",
            "ventas",
            "crecimiento",
            "gerente",
            "negocio",
            "contratación",
            "financiación",
            "jefe de",
        ],
    ),
    (
        DetectedLanguage::German,
        &[
            "leiter",
            "geschäftsführer",
            "unternehmen",
            "vertrieb",
            "wachstum",
            "finanzierung",
            "mittelstand",
            "einstellung",
        ],
    ),
    (
        DetectedLanguage::Italian,
        &[
            "azienda",
            "responsabile",
            "vendite",
            "crescita",
            "direttore",
            "assunzioni",
            "finanziamento",
            "impresa",
        ],
    ),
    (
        DetectedLanguage::Portuguese,
        &[
            "diretor",
            "vendas",
            "crescimento",
            "contratação",
            "financiamento",
            "negócio",
            "gestor",
            "liderança",
        ],
    ),
];

fn is_hebrew(c: char) -> bool {
    ('\u{0590}'..='\u{05FF}').contains(&c)
}

fn is_arabic(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

/// Guess the language openers should be written in. Never fails.
pub fn detect_language(text: &str) -> DetectedLanguage {
    if text.chars().any(is_hebrew) {
        return DetectedLanguage::Hebrew;
    }
    if text.chars().any(is_arabic) {
        return DetectedLanguage::Arabic;
    }

    let lower = text.to_lowercase();
    let mut best = DetectedLanguage::English;
    let mut best_score = 0;

    for (language, keywords) in KEYWORDS {
        let score = keywords.iter().filter(|kw| lower.contains(*kw)).count();
        // Strictly greater: earlier languages keep ties.
        if score > best_score {
            best = *language;
            best_score = score;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_detection() {
        assert_eq!(detect_language("מנהל שיווק"), DetectedLanguage::Hebrew);
        assert_eq!(detect_language("مدير التسويق"), DetectedLanguage::Arabic);
        // Hebrew is checked before Arabic
        assert_eq!(detect_language("مدير שיווק"), DetectedLanguage::Hebrew);
        // Script wins over keywords
        assert_eq!(detect_language("directeur entreprise שיווק"), DetectedLanguage::Hebrew);
    }

    #[test]
    fn test_keyword_detection() {
        assert_eq!(
            detect_language("Directeur marketing\nStartup SaaS\nCroissance"),
            DetectedLanguage::French
        );
        assert_eq!(detect_language("Gerente de ventas\nEmpresa SaaS"), DetectedLanguage::Spanish);
        assert_eq!(detect_language("Leiter Vertrieb\nMittelstand"), DetectedLanguage::German);
        assert_eq!(detect_language("Responsabile vendite\nAzienda"), DetectedLanguage::Italian);
        assert_eq!(
            detect_language("Diretor de vendas\nStartup\nCrescimento"),
            DetectedLanguage::Portuguese
        );
    }

    #[test]
    fn test_english_fallback() {
        assert_eq!(
            detect_language("VP Marketing\nB2B SaaS\nFunding / growth"),
            DetectedLanguage::English
        );
        assert_eq!(detect_language("Head of Sales\nFintech\nHiring"), DetectedLanguage::English);
        assert_eq!(detect_language("Marketing Director\nAgency"), DetectedLanguage::English);
        assert_eq!(detect_language(""), DetectedLanguage::English);
    }

    #[test]
    fn test_tie_break_prefers_earlier_language() {
        // one French keyword, one Spanish keyword
        assert_eq!(detect_language("ventes ventas"), DetectedLanguage::French);
        // one Spanish, one Portuguese
        assert_eq!(detect_language("gerente diretor"), DetectedLanguage::Spanish);
        // Portuguese wins once it scores higher
        assert_eq!(detect_language("gerente diretor vendas"), DetectedLanguage::Portuguese);
    }

    #[test]
    fn test_display_label() {
        assert_eq!(DetectedLanguage::Portuguese.to_string(), "Portuguese");
        assert_eq!(DetectedLanguage::English.as_str(), "English");
    }
}
