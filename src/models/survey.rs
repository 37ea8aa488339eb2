use crate::config::{AffiliateLinks, Platform};

#[derive(Debug, Clone, Copy)]
pub struct SurveyOffer {
    pub name: &'static str,
    pub description: &'static str,
    pub platform: Platform,
}

pub const SURVEY_OFFERS: [SurveyOffer; 2] = [
    SurveyOffer {
        name: "Premise",
        description: "Encuestas pagadas en USD ($1-$5 cada una)",
        platform: Platform::Premise,
    },
    SurveyOffer {
        name: "Toloka",
        description: "Tareas simples desde tu celular ($0.50-$3)",
        platform: Platform::Toloka,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub link: String,
}

/// Resolves the static offers against the affiliate table, in declaration order.
pub fn survey_entries(links: &AffiliateLinks) -> Vec<SurveyEntry> {
    SURVEY_OFFERS
        .iter()
        .map(|offer| SurveyEntry {
            name: offer.name,
            description: offer.description,
            link: links.get(offer.platform).to_string(),
        })
        .collect()
}
