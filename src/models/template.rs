//! Template Models
//!
//! Reusable prompt skeletons, the supported locales, and the localized
//! default set seeded on first use.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::{AppError, AppResult};

/// A prompt template. Placeholders like `{{topic}}` are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub title: String,
    pub text: String,
    /// Seeded from the locale defaults rather than written by the user
    #[serde(default)]
    pub is_default: bool,
}

/// Request to create a user template
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateInput {
    pub title: String,
    pub text: String,
}

impl TemplateInput {
    /// Both fields are required
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() || self.text.trim().is_empty() {
            return Err(AppError::validation(
                "Title and text are required to save a template.",
            ));
        }
        Ok(())
    }
}

impl Template {
    /// Build a user template with a fresh id
    pub fn from_input(input: TemplateInput) -> Self {
        Self {
            id: format!("template_{}", Uuid::now_v7().simple()),
            title: input.title.trim().to_string(),
            text: input.text.trim().to_string(),
            is_default: false,
        }
    }

    /// Distinct `{{placeholder}}` names, in order of first appearance
    pub fn placeholders(&self) -> Vec<String> {
        extract_placeholders(&self.text)
    }
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("placeholder pattern is valid"))
}

/// Extract `{{name}}` tokens from template text
pub fn extract_placeholders(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for cap in placeholder_regex().captures_iter(text) {
        let name = cap[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Supported UI locales
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    /// Map a language tag (`fr`, `fr-CA`, `fr_FR.UTF-8`, ...) to a locale.
    /// Anything that is not French falls back to English.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("fr") {
            Locale::Fr
        } else {
            Locale::En
        }
    }

    /// Short code as persisted
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = AppError;

    /// Strict parse used for explicit user choices
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fr" => Ok(Locale::Fr),
            other => Err(AppError::validation(format!(
                "Unsupported language: {}",
                other
            ))),
        }
    }
}

/// Stable ids for the default slots, shared by every locale
const DEFAULT_IDS: [&str; 4] = [
    "builtin-persona-generator",
    "builtin-text-summarizer",
    "builtin-email-writer",
    "builtin-code-explainer",
];

const EN_DEFAULTS: [(&str, &str); 4] = [
    (
        "Persona Generator",
        "Act as a {{persona_role}}. You are an expert in {{domain}}. Your task is to respond to the following request in the persona described.\n\nRequest: {{user_request}}",
    ),
    (
        "Text Summarizer",
        "Summarize the following text into {{number}} key bullet points. Focus on the main ideas and conclusions.\n\nText:\n\"\"\"\n{{text_to_summarize}}\n\"\"\"",
    ),
    (
        "Email Writer",
        "Write a professional email with the following characteristics:\n- Tone: {{tone_of_email}}\n- Recipient: {{recipient}}\n- Goal: {{goal_of_email}}\n- Key points to include: {{key_points}}\n\nGenerate the email subject and body.",
    ),
    (
        "Code Explainer",
        "Act as an expert software engineer. Explain the following code snippet in a clear and concise way. Describe what it does, how it works, and suggest potential improvements.\n\nLanguage: {{programming_language}}\n\nCode:\n```\n{{code_snippet}}\n```",
    ),
];

const FR_DEFAULTS: [(&str, &str); 4] = [
    (
        "Générateur de Persona",
        "Agis en tant que {{rôle_persona}}. Tu es un expert en {{domaine}}. Ta tâche est de répondre à la requête suivante dans la persona décrite.\n\nRequête : {{requête_utilisateur}}",
    ),
    (
        "Résumeur de Texte",
        "Résume le texte suivant en {{nombre}} points clés. Concentre-toi sur les idées principales et les conclusions.\n\nTexte :\n\"\"\"\n{{texte_à_résumer}}\n\"\"\"",
    ),
    (
        "Rédacteur d'Email",
        "Rédige un email professionnel avec les caractéristiques suivantes :\n- Ton : {{ton_de_l_email}}\n- Destinataire : {{destinataire}}\n- Objectif : {{objectif_de_l_email}}\n- Points clés à inclure : {{points_clés}}\n\nGénère l'objet et le corps de l'email.",
    ),
    (
        "Expliqueur de Code",
        "Agis en tant qu'ingénieur logiciel expert. Explique le fragment de code suivant de manière claire et concise. Décris ce qu'il fait, comment il fonctionne, et suggère des améliorations potentielles.\n\nLangage : {{langage_programmation}}\n\nCode :\n```\n{{fragment_code}}\n```",
    ),
];

/// The fixed default template set for a locale
pub fn default_templates(locale: Locale) -> Vec<Template> {
    let texts = match locale {
        Locale::En => &EN_DEFAULTS,
        Locale::Fr => &FR_DEFAULTS,
    };

    DEFAULT_IDS
        .iter()
        .zip(texts.iter())
        .map(|(id, (title, text))| Template {
            id: (*id).to_string(),
            title: (*title).to_string(),
            text: (*text).to_string(),
            is_default: true,
        })
        .collect()
}
