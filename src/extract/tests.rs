//! Tests for the extract module

use super::*;
use crate::types::{TransactionKind, UNKNOWN_ITEM};
use rust_decimal::Decimal;
use std::str::FromStr;
use test_case::test_case;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// A history row shaped like the market's own markup
fn row(indicator: &str, price: &str, name: &str) -> String {
    format!(
        r#"<div class="market_listing_row market_recent_listing_row" id="history_row_1">
            <div class="market_listing_left_cell market_listing_gainorloss">
                {indicator}
            </div>
            <div class="market_listing_right_cell market_listing_their_price">
                <span class="market_table_value">
                    <span class="market_listing_price">{price}</span>
                </span>
            </div>
            <div class="market_listing_item_name_block">
                <span class="market_listing_item_name" style="color: #D2D2D2;">{name}</span>
            </div>
        </div>"#
    )
}

// ============================================================================
// Structural Parsing Tests
// ============================================================================

#[test]
fn test_select_rows_reads_texts() {
    let html = row("+", "$2.50", "Mann Co. Supply Crate Key");
    let rows = select_rows(&html, &RowSelectors::default());

    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0],
        RawRow::new(Some("+"), Some("$2.50"), Some("Mann Co. Supply Crate Key"))
    );
}

#[test]
fn test_select_rows_missing_elements_are_none() {
    let html = r#"
        <div class="market_listing_row">
            <div class="market_listing_gainorloss">-</div>
        </div>
        <div class="market_listing_row">
            <span class="market_listing_price">$1.00</span>
        </div>"#;
    let rows = select_rows(html, &RowSelectors::default());

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], RawRow::new(Some("-"), None, None));
    assert_eq!(rows[1], RawRow::new(None, Some("$1.00"), None));
}

#[test]
fn test_select_rows_normalizes_whitespace() {
    let html = row("\n   -  \n", "  $1.00\n", "  StatTrak™\n   AK-47 ");
    let rows = select_rows(&html, &RowSelectors::default());

    assert_eq!(rows[0].indicator.as_deref(), Some("-"));
    assert_eq!(rows[0].price.as_deref(), Some("$1.00"));
    assert_eq!(rows[0].name.as_deref(), Some("StatTrak™ AK-47"));
}

#[test]
fn test_select_rows_empty_fragment() {
    assert!(select_rows("", &RowSelectors::default()).is_empty());
    assert!(select_rows("<div>no rows here</div>", &RowSelectors::default()).is_empty());
}

#[test]
fn test_custom_selectors() {
    let selectors = RowSelectors::new("tr", ".sign", ".amt", ".item").unwrap();
    let html = r#"<table>
        <tr><td class="sign">+</td><td class="amt">€3,20</td><td class="item">Sticker</td></tr>
    </table>"#;

    let rows = select_rows(html, &selectors);
    assert_eq!(rows, vec![RawRow::new(Some("+"), Some("€3,20"), Some("Sticker"))]);
}

#[test]
fn test_invalid_selector() {
    let err = RowSelectors::new("div[", ".a", ".b", ".c").unwrap_err();
    assert!(err.is_config_error());
}

// ============================================================================
// Classification Tests
// ============================================================================

#[test_case("-", Some(TransactionKind::Sale) ; "minus is sale")]
#[test_case("+", Some(TransactionKind::Purchase) ; "plus is purchase")]
#[test_case(" - ", Some(TransactionKind::Sale) ; "padded minus")]
#[test_case("", None ; "empty")]
#[test_case("Listing created", None ; "no marker")]
fn test_classify(indicator: &str, expected: Option<TransactionKind>) {
    assert_eq!(classify(indicator), expected);
}

// ============================================================================
// Price Parsing Tests
// ============================================================================

#[test_case("$1.00", Some("$"), "1.00" ; "dollar")]
#[test_case("$2.50", Some("$"), "2.50" ; "dollar fraction")]
#[test_case("€3,20", Some("€"), "3.20" ; "comma separator")]
#[test_case("CDN$ 12.34", Some("CDN$"), "12.34" ; "multi char symbol with space")]
#[test_case("pуб.", None, "" ; "no number")]
#[test_case("12", None, "12" ; "bare integer")]
#[test_case("1,50€", None, "1.50" ; "trailing symbol not captured")]
#[test_case("-$0.03", Some("$"), "0.03" ; "sign is not part of symbol")]
fn test_parse_price(text: &str, symbol: Option<&str>, amount: &str) {
    match parse_price(text) {
        Some((got_symbol, got_amount)) => {
            assert_eq!(got_symbol.as_deref(), symbol);
            assert_eq!(got_amount, dec(amount));
        }
        None => assert!(amount.is_empty(), "expected {text} to parse"),
    }
}

#[test]
fn test_parse_price_keeps_full_precision() {
    let (_, amount) = parse_price("$0.125").unwrap();
    assert_eq!(amount, dec("0.125"));
}

#[test]
fn test_parse_price_overflow_is_rejected() {
    assert!(parse_price("$99999999999999999999999999999999999").is_none());
}

// ============================================================================
// Row Parsing Tests
// ============================================================================

#[test]
fn test_parse_row_sale() {
    let parsed = parse_row(&RawRow::new(Some("-"), Some("$1.00"), Some("ItemA"))).unwrap();
    assert_eq!(parsed.record.name, "ItemA");
    assert_eq!(parsed.record.amount, dec("1.00"));
    assert_eq!(parsed.record.kind, TransactionKind::Sale);
    assert_eq!(parsed.currency.as_deref(), Some("$"));
}

#[test]
fn test_parse_row_unknown_name() {
    let parsed = parse_row(&RawRow::new(Some("+"), Some("$1.00"), None)).unwrap();
    assert_eq!(parsed.record.name, UNKNOWN_ITEM);

    let parsed = parse_row(&RawRow::new(Some("+"), Some("$1.00"), Some(""))).unwrap();
    assert_eq!(parsed.record.name, UNKNOWN_ITEM);
}

#[test_case(RawRow::new(None, Some("$1.00"), Some("A")), DropReason::MissingIndicator ; "no indicator")]
#[test_case(RawRow::new(Some("-"), None, Some("A")), DropReason::MissingPrice ; "no price")]
#[test_case(RawRow::new(Some(""), Some("$1.00"), Some("A")), DropReason::NoMarker ; "no marker")]
#[test_case(RawRow::new(Some("+"), Some("Sold"), Some("A")), DropReason::UnparseablePrice ; "bad price")]
fn test_parse_row_drops(raw: RawRow, reason: DropReason) {
    assert_eq!(parse_row(&raw), Err(reason));
}

// ============================================================================
// Extractor Tests
// ============================================================================

#[test]
fn test_extractor_keeps_document_order() {
    let html = [
        row("-", "$1.00", "ItemA"),
        row("+", "$2.50", "ItemB"),
        row("-", "$0.10", "ItemC"),
    ]
    .join("\n");

    let page = MarkupExtractor::new().extract(&html);
    let names: Vec<_> = page.rows.iter().map(|r| r.record.name.as_str()).collect();
    assert_eq!(names, vec!["ItemA", "ItemB", "ItemC"]);
    assert_eq!(page.rows_seen, 3);
    assert_eq!(page.dropped, 0);
}

#[test]
fn test_extractor_counts_dropped_rows() {
    let html = format!(
        "{}{}{}",
        row("-", "$1.00", "ItemA"),
        r#"<div class="market_listing_row"><div class="market_listing_gainorloss">+</div></div>"#,
        row("", "$5.00", "Listing created"),
    );

    let page = MarkupExtractor::new().extract(&html);
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows_seen, 3);
    assert_eq!(page.dropped, 2);
}

#[test]
fn test_extractor_is_deterministic() {
    let html = [row("-", "$1.00", "A"), row("+", "€2,00", "B")].join("");
    let extractor = MarkupExtractor::new();
    assert_eq!(extractor.extract(&html), extractor.extract(&html));
}
