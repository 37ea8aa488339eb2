//! Message templates in Telegram's legacy Markdown.
//!
//! Every function is pure: the same input always renders the same bytes.

use crate::config::{AffiliateLinks, Platform};
use crate::models::job_listing::JobListing;
use crate::models::outbound::{InlineKeyboardMarkup, OutboundMessage};
use crate::models::survey::SurveyEntry;

pub const CB_JOBS: &str = "trabajos";
pub const CB_SURVEYS: &str = "encuestas";
pub const CB_GUIDES: &str = "guias";
pub const CB_BUY_GUIDE: &str = "comprar_guia";

pub const GUIDE_PRICE: &str = "$5";

pub const NO_JOBS_TEXT: &str = "⚠️ No hay trabajos disponibles ahora. Intenta más tarde.";
pub const FAILURE_TEXT: &str = "❌ Ocurrió un error. Por favor, intenta nuevamente.";

pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single_column([
        ("📌 Trabajos Remotos", CB_JOBS),
        ("📝 Encuestas Pagadas", CB_SURVEYS),
        ("📚 Guías Premium", CB_GUIDES),
    ])
}

pub fn welcome(first_name: &str) -> OutboundMessage {
    OutboundMessage::text(format!(
        "¡Hola {}! 👋\n\nSoy *GanaDineroLA*, tu asistente para ganar dinero en LATAM.",
        escape(first_name)
    ))
    .with_keyboard(main_menu())
}

pub fn job_listing(job: &JobListing, links: &AffiliateLinks) -> OutboundMessage {
    OutboundMessage::text(format!(
        "*{}*\n💵 *Presupuesto*: {}\n🔗 [Ver trabajo]({})\n🎯 [Postúlate aquí]({})",
        bold_safe(&job.title),
        escape(&job.budget),
        link_target(&job.link),
        link_target(links.get(Platform::Workana))
    ))
    .without_preview()
}

pub fn no_jobs() -> OutboundMessage {
    OutboundMessage::text(NO_JOBS_TEXT)
}

pub fn survey(entry: &SurveyEntry) -> OutboundMessage {
    OutboundMessage::text(format!(
        "📌 *{}*\n{}\n🔗 [Regístrate aquí]({})",
        bold_safe(entry.name),
        escape(entry.description),
        link_target(&entry.link)
    ))
}

pub fn guide() -> OutboundMessage {
    OutboundMessage::text(format!(
        "📚 *Guía Premium: Cómo Cobrar en USD desde LATAM*\n\
         ✅ Métodos comprobados (PayPal, Binance, Zinli)\n\
         ✅ Evita bloqueos y comisiones altas\n\
         ✅ Incluye lista de empleadores que pagan en crypto\n\n\
         Precio: {} (pago por Binance/PayPal)",
        GUIDE_PRICE
    ))
    .with_keyboard(InlineKeyboardMarkup::single_column([(
        "💰 Comprar Guía ($5)",
        CB_BUY_GUIDE,
    )]))
}

pub fn buy_guide(wallet_address: &str) -> OutboundMessage {
    OutboundMessage::text(format!(
        "🛒 *Compra la Guía Premium*\n\n\
         1. Envía {} vía Binance a esta dirección:\n\
         `{}`\n\n\
         2. Responde con el hash de la transacción.\n\
         3. Recibirás el PDF en menos de 24h.",
        GUIDE_PRICE,
        wallet_address.replace('`', "")
    ))
}

pub fn daily_opportunity(job: &JobListing) -> OutboundMessage {
    OutboundMessage::text(format!(
        "🌟 *Oportunidad Diaria*\n\n{}\n🔗 {}",
        escape(&job.title),
        escape(&job.link)
    ))
}

pub fn failure_notice() -> OutboundMessage {
    OutboundMessage::text(FAILURE_TEXT)
}

pub fn broadcast_report(attempted: usize, delivered: usize, failed: &[i64]) -> OutboundMessage {
    let mut text = format!(
        "📊 *Envío diario*\nDestinatarios: {}\nEntregados: {}\nFallidos: {}",
        attempted,
        delivered,
        failed.len()
    );
    if !failed.is_empty() {
        let ids: Vec<String> = failed.iter().map(i64::to_string).collect();
        text.push_str(&format!("\n`{}`", ids.join(", ")));
    }
    OutboundMessage::text(text)
}

/// Escapes legacy Markdown control characters in text placed outside entities.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// A `)` would close the `[text](url)` entity early, so it is percent-encoded.
fn link_target(url: &str) -> String {
    url.replace(')', "%29")
}

/// Legacy Markdown has no escaping inside entities, so the closing marker is dropped.
fn bold_safe(text: &str) -> String {
    text.replace('*', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::survey::survey_entries;

    fn job() -> JobListing {
        JobListing::new(
            "Diseño de logo",
            "USD 50 - 100",
            "https://www.workana.com/job/diseno-de-logo",
        )
    }

    #[test]
    fn job_rendering_is_deterministic() {
        let links = AffiliateLinks::default();
        assert_eq!(job_listing(&job(), &links), job_listing(&job(), &links));
    }

    #[test]
    fn job_message_carries_link_budget_and_affiliate() {
        let links = AffiliateLinks::default();
        let msg = job_listing(&job(), &links);
        assert!(msg.text.starts_with("*Diseño de logo*\n"));
        assert!(msg.text.contains("💵 *Presupuesto*: USD 50 - 100"));
        assert!(msg
            .text
            .contains("[Ver trabajo](https://www.workana.com/job/diseno-de-logo)"));
        assert!(msg.text.contains(&format!("[Postúlate aquí]({})", links.workana)));
        assert!(msg.disable_preview);
        assert!(msg.keyboard.is_none());
    }

    #[test]
    fn scraped_markup_cannot_break_entities() {
        let listing = JobListing::new("*Urgente* bot_telegram", "USD_10", "https://x.test/1");
        let msg = job_listing(&listing, &AffiliateLinks::default());
        assert!(msg.text.starts_with("*Urgente bot_telegram*\n"));
        assert!(msg.text.contains("USD\\_10"));
    }

    #[test]
    fn closing_paren_in_link_stays_inside_the_entity() {
        let listing = JobListing::new("Bot", "USD 10", "https://www.workana.com/job/bot_(v2)");
        let msg = job_listing(&listing, &AffiliateLinks::default());
        assert!(msg
            .text
            .contains("[Ver trabajo](https://www.workana.com/job/bot_(v2%29)\n"));
    }

    #[test]
    fn daily_opportunity_escapes_underscores_in_link() {
        let listing = JobListing::new(
            "App movil",
            "USD 300",
            "https://www.workana.com/job/app_movil_flutter",
        );
        let msg = daily_opportunity(&listing);
        assert_eq!(
            msg.text,
            "🌟 *Oportunidad Diaria*\n\nApp movil\n🔗 https://www.workana.com/job/app\\_movil\\_flutter"
        );
    }

    #[test]
    fn welcome_escapes_name_and_offers_menu() {
        let msg = welcome("Jo_se");
        assert!(msg.text.starts_with("¡Hola Jo\\_se! 👋"));
        let ids: Vec<&str> = msg
            .keyboard
            .as_ref()
            .unwrap()
            .buttons()
            .map(|b| b.callback_data.as_str())
            .collect();
        assert_eq!(ids, [CB_JOBS, CB_SURVEYS, CB_GUIDES]);
    }

    #[test]
    fn guide_has_single_buy_button() {
        let msg = guide();
        assert!(msg.text.contains("Guía Premium"));
        assert!(msg.text.contains("$5"));
        let buttons: Vec<_> = msg.keyboard.as_ref().unwrap().buttons().collect();
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].text, "💰 Comprar Guía ($5)");
        assert_eq!(buttons[0].callback_data, CB_BUY_GUIDE);
    }

    #[test]
    fn buy_guide_shows_wallet_in_code_span() {
        let msg = buy_guide("bNB1q2w3e4r5t6y7u8i9o0p");
        assert!(msg.text.contains("`bNB1q2w3e4r5t6y7u8i9o0p`"));
        assert!(msg.text.contains("hash de la transacción"));
    }

    #[test]
    fn surveys_render_in_declaration_order() {
        let entries = survey_entries(&AffiliateLinks::default());
        let rendered: Vec<_> = entries.iter().map(survey).collect();
        assert!(rendered[0].text.starts_with("📌 *Premise*"));
        assert!(rendered[1].text.starts_with("📌 *Toloka*"));
        assert!(rendered[1].text.contains("toloka.yandex.com"));
    }

    #[test]
    fn report_lists_failed_chats() {
        let msg = broadcast_report(3, 2, &[77]);
        assert!(msg.text.contains("Fallidos: 1"));
        assert!(msg.text.contains("`77`"));
    }
}
