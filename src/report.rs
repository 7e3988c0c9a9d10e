//! Lenient parse of the six-section analysis.
//!
//! The prompt asks for `### 1.` … `### 6.` headings, but the model is free to
//! deviate. [`AnalysisReport::parse`] never fails: it picks up whichever
//! numbered headings it finds and keeps the raw text alongside, so callers
//! can fall back to rendering the whole answer.

use crate::prompts::SECTION_TITLES;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// `### 3. TITLE`, optionally bolded (`### **3. TITLE**`), at a line start.
static RE_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*###[ \t]*(?:\*\*)?[ \t]*([1-6])\.[ \t]*([^\r\n]*?)(?:\*\*)?[ \t]*\r?$").unwrap());

/// One numbered section of the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    /// 1-based section number as written by the model.
    pub number: u8,
    pub title: String,
    pub body: String,
}

/// The analysis text plus whatever section structure could be recovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// Text before the first recognised heading, trimmed.
    pub preamble: String,
    /// Sections in the order they appear in the text.
    pub sections: Vec<ReportSection>,
}

impl AnalysisReport {
    pub fn parse(text: &str) -> Self {
        let heads: Vec<_> = RE_SECTION.captures_iter(text).collect();

        let Some(first) = heads.first() else {
            return Self {
                preamble: text.trim().to_string(),
                sections: Vec::new(),
            };
        };

        let preamble = text[..first.get(0).map_or(0, |m| m.start())].trim().to_string();
        let mut sections = Vec::with_capacity(heads.len());

        for (i, cap) in heads.iter().enumerate() {
            let whole = cap.get(0).map_or(0..0, |m| m.range());
            let body_end = heads
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(text.len(), |m| m.start());
            let number = cap[1].parse().unwrap_or_default();

            sections.push(ReportSection {
                number,
                title: cap[2].trim().to_string(),
                body: text[whole.end..body_end].trim().to_string(),
            });
        }

        Self { preamble, sections }
    }

    /// First section with the given number.
    pub fn section(&self, number: u8) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.number == number)
    }

    /// Section numbers the prompt asked for that the answer lacks.
    pub fn missing(&self) -> Vec<u8> {
        (1..=SECTION_TITLES.len() as u8)
            .filter(|n| self.section(*n).is_none())
            .collect()
    }

    /// All six sections are present.
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_answer() -> String {
        SECTION_TITLES
            .iter()
            .enumerate()
            .map(|(i, t)| format!("### {}. {}\n- **Item:** valor {}\n", i + 1, t, i + 1))
            .collect()
    }

    #[test]
    fn parses_all_six_sections() {
        let r = AnalysisReport::parse(&full_answer());
        assert!(r.is_complete());
        assert_eq!(r.sections.len(), 6);
        assert_eq!(r.sections[0].title, SECTION_TITLES[0]);
        assert_eq!(r.sections[5].body, "- **Item:** valor 6");
        assert!(r.preamble.is_empty());
    }

    #[test]
    fn keeps_preamble_and_reports_missing() {
        let text = "Segue a análise.\n\n### 1. RESUMO\nCorpo\n### 3. AGENTES\nRuído";
        let r = AnalysisReport::parse(text);
        assert_eq!(r.preamble, "Segue a análise.");
        assert_eq!(r.section(1).map(|s| s.body.as_str()), Some("Corpo"));
        assert_eq!(r.section(3).map(|s| s.title.as_str()), Some("AGENTES"));
        assert_eq!(r.missing(), vec![2, 4, 5, 6]);
    }

    #[test]
    fn bold_heading_and_crlf() {
        let r = AnalysisReport::parse("### **2. FUNÇÕES**\r\nMotorista\r\n");
        let s = r.section(2).unwrap();
        assert_eq!(s.title, "FUNÇÕES");
        assert_eq!(s.body, "Motorista");
    }

    #[test]
    fn unstructured_text_is_all_preamble() {
        let r = AnalysisReport::parse("  Não foi possível ler o documento.  ");
        assert!(r.sections.is_empty());
        assert_eq!(r.preamble, "Não foi possível ler o documento.");
        assert_eq!(r.missing().len(), 6);
    }

    #[test]
    fn unnumbered_subheadings_stay_in_body() {
        let r = AnalysisReport::parse("### 4. PONTOS\n### Ruído\nSem dosimetria");
        assert_eq!(r.sections.len(), 1);
        assert_eq!(r.sections[0].body, "### Ruído\nSem dosimetria");
    }
}
