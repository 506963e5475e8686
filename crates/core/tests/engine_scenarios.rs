use rust_decimal::Decimal;
use rigquote_core::{
    Catalog, CatalogItem, CatalogSource, EmbeddedCatalog, QuoteEngine, QuoteSession, RateTables,
    SearchOutcome, Slot,
};

fn item(category: &str, model: &str, price: i64) -> CatalogItem {
    CatalogItem {
        category: category.to_string(),
        model: model.to_string(),
        price: Decimal::from(price),
        priority: false,
    }
}

#[test]
fn quote_scenario_from_matched_text() {
    let catalog = EmbeddedCatalog.catalog();
    let tables = RateTables::seed();
    let engine = QuoteEngine::new();

    let selection = engine.resolve_text(&catalog, "T1000 4G with a TSK-C3 I5-14400 and 500W");

    let mut session = QuoteSession::new();
    session.apply_bundle(selection);
    session.select_discount(Some("bulk".to_string()));
    session.set_special_rebate(Decimal::from(100));

    let evaluation = engine.evaluate(&catalog, &session, &tables);

    // (3100 + 2200 + 200) * 1.2 * 0.99 - 100 = 6434
    assert_eq!(evaluation.totals.cost_total, Decimal::from(5500));
    assert_eq!(evaluation.totals.price_before_discount, Decimal::from(6600));
    assert_eq!(evaluation.totals.final_price, Decimal::from(6434));
    assert!(evaluation.document.text.contains("host: TSK-C3 I5-14400 * 1"));
    assert!(evaluation.document.text.contains("Final price: 6434.00"));
}

#[test]
fn gpu_only_scenario_matches_reference_numbers() {
    let catalog = EmbeddedCatalog.catalog();
    let tables = RateTables::seed();
    let engine = QuoteEngine::new();

    let mut session = QuoteSession::new();
    session.selection_mut().set_model(Slot::Gpu, "T1000 4G");
    session.selection_mut().set_model(Slot::Memory, "");
    session.select_discount(Some("bulk".to_string()));
    session.set_special_rebate(Decimal::from(100));

    let evaluation = engine.evaluate(&catalog, &session, &tables);

    assert_eq!(evaluation.totals.cost_total, Decimal::from(2200));
    assert_eq!(evaluation.totals.price_before_discount, Decimal::from(2640));
    assert_eq!(evaluation.totals.final_price, Decimal::new(25136, 1));
}

#[test]
fn budget_search_picks_best_combination_under_budget() {
    let catalog = Catalog::new(vec![
        item("host", "H2800", 2800),
        item("host", "H3100", 3100),
        item("memory", "M750", 750),
        item("memory", "M1650", 1650),
        item("gpu", "G900", 900),
        item("gpu", "G2200", 2200),
    ]);

    let outcome = QuoteEngine::new()
        .recommend(&catalog, "budget 5000")
        .expect("search space within cap");

    let SearchOutcome::Bundle(selection) = outcome else {
        panic!("expected a feasible bundle");
    };
    assert_eq!(selection.choice(Slot::Host).model.as_deref(), Some("H3100"));
    assert_eq!(selection.choice(Slot::Memory).model.as_deref(), Some("M750"));
    assert_eq!(selection.choice(Slot::Gpu).model.as_deref(), Some("G900"));
}

#[test]
fn unconstrained_search_maximizes_total_value() {
    let catalog = Catalog::new(vec![
        item("host", "H2800", 2800),
        item("host", "H3100", 3100),
        item("memory", "M750", 750),
        item("memory", "M1650", 1650),
        item("gpu", "G900", 900),
        item("gpu", "G2200", 2200),
    ]);

    let outcome = QuoteEngine::new()
        .recommend(&catalog, "whatever is best")
        .expect("search space within cap");

    let SearchOutcome::Bundle(selection) = outcome else {
        panic!("expected a bundle");
    };
    // 3100 + 1650 + 2200 = 6950
    assert_eq!(selection.choice(Slot::Host).model.as_deref(), Some("H3100"));
    assert_eq!(selection.choice(Slot::Memory).model.as_deref(), Some("M1650"));
    assert_eq!(selection.choice(Slot::Gpu).model.as_deref(), Some("G2200"));
}

#[test]
fn final_price_monotonicity_in_rate_factors() {
    let catalog = EmbeddedCatalog.catalog();
    let engine = QuoteEngine::new();

    let mut session = QuoteSession::new();
    session.selection_mut().set_model(Slot::Gpu, "T1000 4G");

    let tables_low = RateTables {
        discounts: Vec::new(),
        markups: vec![rigquote_core::MarkupPoint {
            id: "m".to_string(),
            margin: Decimal::new(11, 1),
        }],
    };
    let tables_high = RateTables {
        discounts: Vec::new(),
        markups: vec![rigquote_core::MarkupPoint {
            id: "m".to_string(),
            margin: Decimal::new(13, 1),
        }],
    };

    let low = engine.evaluate(&catalog, &session, &tables_low).totals.final_price;
    let high = engine.evaluate(&catalog, &session, &tables_high).totals.final_price;
    assert!(high >= low, "raising the margin must not lower the final price");

    let mut rebated = session.clone();
    rebated.set_special_rebate(Decimal::from(500));
    let with_rebate = engine.evaluate(&catalog, &rebated, &tables_low).totals.final_price;
    assert!(with_rebate <= low, "raising the rebate must not raise the final price");
}

#[test]
fn rendered_document_skips_zero_quantity_entries() {
    let catalog = EmbeddedCatalog.catalog();
    let tables = RateTables::seed();

    let mut session = QuoteSession::new();
    session.selection_mut().set_model(Slot::Gpu, "T1000 4G");
    session.selection_mut().set_model(Slot::Monitor, "21.5-TE22-19");
    session.selection_mut().set_quantity(Slot::Monitor, 0);

    let evaluation = QuoteEngine::new().evaluate(&catalog, &session, &tables);

    assert!(evaluation.document.text.contains("gpu: T1000 4G * 1"));
    assert!(!evaluation.document.text.contains("monitor"));
}

#[test]
fn stale_selection_still_prices_to_a_total() {
    let catalog = Catalog::new(vec![item("gpu", "T1000 4G", 2200)]);
    let tables = RateTables::default();

    let mut session = QuoteSession::new();
    session.selection_mut().set_model(Slot::Gpu, "T1000 4G");
    session.selection_mut().set_model(Slot::Host, "model removed from catalog");

    let evaluation = QuoteEngine::new().evaluate(&catalog, &session, &tables);
    assert_eq!(evaluation.totals.cost_total, Decimal::from(2200));
}
