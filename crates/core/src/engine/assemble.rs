//! Canonical rendering of a resolved bundle. The text block is the contract
//! surfaced to export and clipboard collaborators and must stay byte-stable
//! for identical input.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pricing::QuoteTotals;
use crate::domain::selection::{CustomItem, Selection};

const DIVIDER: &str = "--------------------------------";
const EMPTY_PLACEHOLDER: &str = "(no parts selected)";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDocument {
    pub lines: Vec<String>,
    pub text: String,
}

/// Summary row handed to the spreadsheet collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub model_code: String,
    pub config_line: String,
    pub quantity: u32,
    pub final_price: Decimal,
}

/// Two-decimal money rendering happens here and only here; accumulation
/// upstream stays unrounded.
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Ordered line entries: fixed slots in canonical order, then custom items
/// in insertion order. Empty and zero-quantity entries are skipped.
pub fn line_items(selection: &Selection, custom_items: &[CustomItem]) -> Vec<String> {
    let mut lines: Vec<String> = selection
        .filled()
        .map(|(slot, choice)| {
            format!(
                "{}: {} * {}",
                slot.label(),
                choice.model.as_deref().unwrap_or_default(),
                choice.quantity
            )
        })
        .collect();

    for custom in custom_items.iter().filter(|item| item.is_billable()) {
        let category = if custom.category.is_empty() { "custom" } else { &custom.category };
        lines.push(format!("{}: {} * {}", category, custom.model, custom.quantity));
    }

    lines
}

pub fn assemble(
    selection: &Selection,
    custom_items: &[CustomItem],
    applied_discount: Option<(&str, Decimal)>,
    special_rebate: Decimal,
    totals: QuoteTotals,
) -> QuoteDocument {
    let lines = line_items(selection, custom_items);

    let mut text = String::from("Product Quote\n");
    text.push_str(DIVIDER);
    text.push('\n');
    if lines.is_empty() {
        text.push_str(EMPTY_PLACEHOLDER);
        text.push('\n');
    } else {
        for line in &lines {
            text.push_str(line);
            text.push('\n');
        }
    }
    text.push_str(DIVIDER);
    text.push('\n');

    if let Some((label, rate)) = applied_discount {
        if rate < Decimal::ONE {
            text.push_str(&format!("Discount applied: {label}\n"));
        }
    }
    if special_rebate > Decimal::ZERO {
        text.push_str(&format!("Special rebate: -{}\n", format_money(special_rebate)));
    }
    text.push('\n');
    text.push_str(&format!("Final price: {}\n", format_money(totals.final_price)));

    QuoteDocument { lines, text }
}

/// The export row reuses the host model's leading token as the bundle code,
/// with all configured part models joined into one description cell.
pub fn export_summary(
    selection: &Selection,
    custom_items: &[CustomItem],
    totals: QuoteTotals,
) -> Option<ExportSummary> {
    let mut parts: Vec<&str> = selection
        .filled()
        .filter_map(|(_, choice)| choice.model.as_deref())
        .collect();
    parts.extend(custom_items.iter().filter(|item| item.is_billable()).map(|item| item.model.as_str()));

    if parts.is_empty() {
        return None;
    }

    let model_code = selection
        .choice(crate::domain::selection::Slot::Host)
        .model
        .as_deref()
        .and_then(|model| model.split_whitespace().next())
        .unwrap_or("custom-host")
        .to_string();

    Some(ExportSummary {
        model_code,
        config_line: parts.join(" | "),
        quantity: 1,
        final_price: totals.final_price,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{assemble, export_summary, format_money, line_items};
    use crate::domain::selection::{CustomItem, Selection, Slot};
    use crate::engine::pricing::QuoteTotals;

    fn totals(final_price: Decimal) -> QuoteTotals {
        QuoteTotals {
            cost_total: Decimal::ZERO,
            price_before_discount: Decimal::ZERO,
            final_price,
        }
    }

    #[test]
    fn renders_slots_in_canonical_order_then_custom_items() {
        let mut selection = Selection::initial();
        selection.set_model(Slot::Gpu, "T1000 4G");
        selection.set_model(Slot::Host, "TSK-C3 I5-14400");
        let fan = CustomItem::new("cooling", "Silent Fan", Decimal::from(80), 2)
            .expect("valid custom item");

        let lines = line_items(&selection, &[fan]);
        assert_eq!(
            lines,
            vec![
                "host: TSK-C3 I5-14400 * 1".to_string(),
                "gpu: T1000 4G * 1".to_string(),
                "cooling: Silent Fan * 2".to_string(),
            ]
        );
    }

    #[test]
    fn zero_quantity_entries_are_excluded() {
        let mut selection = Selection::initial();
        selection.set_model(Slot::Memory, "8G DDR5 5600");
        selection.set_quantity(Slot::Memory, 0);

        assert!(line_items(&selection, &[]).is_empty());
    }

    #[test]
    fn document_text_is_byte_stable() {
        let mut selection = Selection::initial();
        selection.set_model(Slot::Gpu, "T1000 4G");

        let document = assemble(
            &selection,
            &[],
            Some(("Bulk discount (0.99)", Decimal::new(99, 2))),
            Decimal::from(100),
            totals(Decimal::new(25136, 1)),
        );

        let expected = "Product Quote\n\
                        --------------------------------\n\
                        gpu: T1000 4G * 1\n\
                        --------------------------------\n\
                        Discount applied: Bulk discount (0.99)\n\
                        Special rebate: -100.00\n\
                        \n\
                        Final price: 2513.60\n";
        assert_eq!(document.text, expected);

        let again = assemble(
            &selection,
            &[],
            Some(("Bulk discount (0.99)", Decimal::new(99, 2))),
            Decimal::from(100),
            totals(Decimal::new(25136, 1)),
        );
        assert_eq!(document, again);
    }

    #[test]
    fn summary_omits_neutral_discount_and_zero_rebate() {
        let mut selection = Selection::initial();
        selection.set_model(Slot::Psu, "300W");

        let document =
            assemble(&selection, &[], None, Decimal::ZERO, totals(Decimal::ZERO));

        assert!(!document.text.contains("Discount applied"));
        assert!(!document.text.contains("Special rebate"));
        assert!(document.text.ends_with("Final price: 0.00\n"));
    }

    #[test]
    fn empty_selection_renders_placeholder() {
        let document =
            assemble(&Selection::initial(), &[], None, Decimal::ZERO, totals(Decimal::ZERO));

        assert!(document.lines.is_empty());
        assert!(document.text.contains("(no parts selected)"));
    }

    #[test]
    fn export_summary_uses_host_leading_token_as_code() {
        let mut selection = Selection::initial();
        selection.set_model(Slot::Host, "TSK-C3 I5-14400");
        selection.set_model(Slot::Gpu, "T1000 4G");

        let summary = export_summary(&selection, &[], totals(Decimal::from(5000)))
            .expect("billable parts present");
        assert_eq!(summary.model_code, "TSK-C3");
        assert_eq!(summary.config_line, "TSK-C3 I5-14400 | T1000 4G");
        assert_eq!(summary.quantity, 1);
    }

    #[test]
    fn export_summary_without_host_falls_back() {
        let mut selection = Selection::initial();
        selection.set_model(Slot::Gpu, "T1000 4G");

        let summary = export_summary(&selection, &[], totals(Decimal::from(2200)))
            .expect("billable parts present");
        assert_eq!(summary.model_code, "custom-host");
    }

    #[test]
    fn export_summary_requires_at_least_one_part() {
        assert_eq!(
            export_summary(&Selection::initial(), &[], totals(Decimal::ZERO)),
            None
        );
    }

    #[test]
    fn money_formatting_pads_to_two_decimals() {
        assert_eq!(format_money(Decimal::new(25136, 1)), "2513.60");
        assert_eq!(format_money(Decimal::from(100)), "100.00");
        // round_dp uses banker's rounding at the midpoint.
        assert_eq!(format_money(Decimal::new(12345, 3)), "12.34");
    }
}
