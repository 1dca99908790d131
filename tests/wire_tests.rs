//! # Wire Tests
//!
//! End-to-end checks of the exact command text sent to the printer: single
//! commands, whole documents, JSON input and the in-memory transport.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use scontrino::document::{
    Commercial, CommercialReversal, CommercialWithInvoice, Document, DocumentId, Invoice,
    Management, PosReversal,
};
use scontrino::json_api::JsonDocument;
use scontrino::protocol::commands::{
    Barcode, Command, ControlOp, CustomerIdentifier, DiscountAmount, DiscountPercentage,
    DisplayMessage, InvoiceDetails, OpenInvoice, OpenInvoiceCommercialDocument, Payment,
    Product, RawCommand, Trailer,
};
use scontrino::protocol::field::{Field, SeparatorKind};
use scontrino::protocol::terminator::{Terminator, TerminatorKind};
use scontrino::transport::{MemoryTransport, Transport};
use scontrino::ScontrinoError;

fn encode(command: impl Into<Command>) -> String {
    command.into().encode().unwrap()
}

fn cash() -> Payment {
    Payment::new(TerminatorKind::PaymentCash).unwrap()
}

fn details(count: usize) -> Vec<InvoiceDetails> {
    (0..count)
        .map(|i| InvoiceDetails::new(&format!("line {}", i)))
        .collect()
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_product_forms() {
    assert_eq!(
        encode(Product::new(750).description("BREAD").quantity(2).department(3)),
        "\"BREAD\"2*750H3R"
    );
    assert_eq!(encode(Product::new(750)), "750HR");
    assert_eq!(encode(Product::new(0).description("FREE")), "\"FREE\"R");
}

#[test]
fn test_product_description_truncated() {
    let long = "x".repeat(50);
    assert_eq!(
        encode(Product::new(1).description(&long)),
        format!("\"{}\"1HR", "x".repeat(38))
    );
}

#[test]
fn test_trailer_padding_and_truncation() {
    assert_eq!(
        encode(Trailer::new("Hello World!")),
        format!("\"Hello World!{}\"@40F", " ".repeat(27))
    );
    let long = "abcdefgh".repeat(7);
    assert_eq!(long.len(), 56);
    assert_eq!(
        encode(Trailer::new(&long)),
        format!("\"{}\"@40F", &long[..46])
    );
}

#[test]
fn test_payments() {
    let cards = Payment::new(TerminatorKind::PaymentCards)
        .unwrap()
        .amount(100)
        .description("test");
    assert_eq!(encode(cards), "100H\"test\"3T");

    let err = Payment::new(TerminatorKind::Sold).unwrap_err();
    assert!(matches!(err, ScontrinoError::InvalidPaymentMethod(_)));
}

#[test]
fn test_customer_identifier() {
    assert_eq!(
        encode(CustomerIdentifier::new("RSSMRA00A01F205F").unwrap()),
        "\"RSSMRA00A01F205F\"@39F"
    );
    let err = CustomerIdentifier::new("test").unwrap_err();
    assert!(matches!(err, ScontrinoError::InvalidIdentifierLength(4)));
}

#[test]
fn test_discounts() {
    assert_eq!(encode(DiscountPercentage::new(50.12)), "50.121M");
    assert_eq!(encode(DiscountAmount::new(250)), "250H3M");
}

#[test]
fn test_barcodes() {
    assert_eq!(encode(Barcode::new("1234567890123").unwrap()), "\"1234567890123\"1Z");
    assert_eq!(encode(Barcode::new("12345678").unwrap()), "\"12345678\"2Z");
    assert!(matches!(
        Barcode::new("123").unwrap_err(),
        ScontrinoError::InvalidBarcodeLength(3)
    ));
}

#[test]
fn test_invoice_openers() {
    assert_eq!(encode(OpenInvoice::new(Some(7))), "\"00007\"101M");
    assert_eq!(encode(OpenInvoice::new(None)), "\"00000\"101M");
    assert_eq!(encode(OpenInvoice::new(Some(100_000))), "\"00000\"101M");
    assert_eq!(
        encode(OpenInvoiceCommercialDocument::new(Some(42))),
        "\"00042\"111M"
    );
}

#[test]
fn test_display_lines() {
    assert_eq!(encode(DisplayMessage::new("Hi", 1)), "\"Hi\"1%");
    assert_eq!(encode(DisplayMessage::new("Hi", 2)), "\"Hi\"2%");
    assert_eq!(encode(DisplayMessage::new("Hi", 9)), "\"Hi\"2%");
}

#[test]
fn test_control_commands() {
    assert_eq!(encode(ControlOp::OpenDrawer), "a");
    assert_eq!(encode(ControlOp::OpenManagement), "j");
    assert_eq!(encode(ControlOp::CloseManagement), "J");
    for op in ControlOp::ALL {
        assert_eq!(ControlOp::from_name(op.name()), Some(*op));
    }
}

// ============================================================================
// Documents
// ============================================================================

#[test]
fn test_full_commercial_order() {
    let receipt = Commercial::new(
        vec![
            Product::new(750).description("BREAD"),
            Product::new(120).description("MILK").quantity(2),
        ],
        vec![cash().amount(1000)],
    )
    .discount_amount(DiscountAmount::new(10))
    .discount_percentage(DiscountPercentage::new(5.0))
    .customer_id(CustomerIdentifier::new("12345678").unwrap())
    .trailer(Trailer::new("Grazie"));

    let blocks = Document::from(receipt).encode().unwrap();
    assert_eq!(
        blocks,
        vec![
            "\"BREAD\"750HR".to_string(),
            "\"MILK\"2*120HR".to_string(),
            "10H3M".to_string(),
            "5.001M".to_string(),
            "\"12345678\"@39F".to_string(),
            format!("\"Grazie{}\"@40F", " ".repeat(33)),
            "1000H1T".to_string(),
        ]
    );
}

#[test]
fn test_management_rows() {
    let doc = Document::from(Management::new(&["Line one", "Line two"]));
    assert_eq!(
        doc.encode().unwrap(),
        vec!["j", "\"Line one\"@", "\"Line two\"@", "J"]
    );
}

#[test]
fn test_reversal_documents() {
    let date = NaiveDate::from_ymd_opt(2023, 6, 5).unwrap();
    let id = DocumentId::new(1, 2, date, Some("99MEY012345"));

    let doc = Document::from(
        CommercialReversal::commercial_return(id.clone()).product(Product::new(300)),
    );
    assert_eq!(
        doc.encode().unwrap(),
        vec!["\"0001-0002-05-06-23-99MEY012345\"104M", "300HR"]
    );

    let doc = Document::from(CommercialReversal::cancellation(id));
    assert_eq!(
        doc.encode().unwrap(),
        vec!["\"0001-0002-05-06-23-99MEY012345\"105M"]
    );

    let doc = Document::from(PosReversal::pos_return(date).payment(cash().amount(300)));
    assert_eq!(doc.encode().unwrap(), vec!["\"06-05-23/POS\"106M", "300H1T"]);
}

#[test]
fn test_invoice_structure() {
    let invoice = Invoice::new(
        OpenInvoice::new(Some(12)),
        details(2),
        vec![Product::new(1000)],
        vec![cash()],
    )
    .unwrap();
    let blocks = Document::from(invoice).encode().unwrap();
    assert_eq!(blocks.len(), 5);
    assert!(blocks[0].ends_with("@38F"));
    assert!(blocks[1].ends_with("@38F"));
    assert_eq!(blocks[2], "\"00012\"101M");
    assert_eq!(blocks[3], "1000HR");
    assert_eq!(blocks[4], "1T");
}

#[test]
fn test_invoice_validation() {
    for count in [0, 6] {
        let err = Invoice::new(
            OpenInvoice::new(None),
            details(count),
            vec![Product::new(1)],
            vec![cash()],
        )
        .unwrap_err();
        assert!(matches!(err, ScontrinoError::InvalidCustomerDetailsCount(n) if n == count));
    }

    let err = Invoice::new(OpenInvoice::new(None), details(1), vec![], vec![cash()]).unwrap_err();
    assert!(matches!(err, ScontrinoError::MissingProducts));

    let err = Invoice::new(
        OpenInvoice::new(None),
        details(1),
        vec![Product::new(1)],
        vec![],
    )
    .unwrap_err();
    assert!(matches!(err, ScontrinoError::MissingPayments));
}

#[test]
fn test_commercial_with_invoice_keeps_receipt_separate() {
    let receipt = Commercial::new(vec![Product::new(250)], vec![cash()]);
    let doc = CommercialWithInvoice::new(
        OpenInvoiceCommercialDocument::new(None),
        details(1),
        receipt.clone(),
    )
    .unwrap();

    assert_eq!(
        Document::from(doc.commercial().clone()).encode().unwrap(),
        vec!["250HR", "1T"]
    );
    let blocks = Document::from(doc).encode().unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[1], "\"00000\"111M");
}

#[test]
fn test_encoding_is_repeatable() {
    let doc = Document::from(Commercial::new(
        vec![Product::new(750).description("BREAD")],
        vec![cash()],
    ));
    assert_eq!(doc.encode().unwrap(), doc.encode().unwrap());
}

// ============================================================================
// JSON and transport
// ============================================================================

#[test]
fn test_json_invoice_to_transport() {
    let doc = JsonDocument::parse(
        r#"{
            "type": "invoice",
            "number": 3,
            "customer_details": ["ACME S.p.A."],
            "products": [{"unit_price": 1999, "description": "WIDGET"}],
            "payments": [{"method": "payment-cards"}]
        }"#,
    )
    .unwrap();

    let mut transport = MemoryTransport::new();
    transport.open().unwrap();
    transport.print_document(&doc).unwrap();
    transport.close().unwrap();
    transport.close().unwrap();

    assert_eq!(
        transport.blocks(),
        &[
            format!("\"ACME S.p.A.{}\"@38F", " ".repeat(29)),
            "\"00003\"101M".to_string(),
            "\"WIDGET\"1999HR".to_string(),
            "3T".to_string(),
        ]
    );
    assert_eq!(transport.flushes(), 1);
}

#[test]
fn test_json_commercial_with_invoice_sends_receipt() {
    let doc = JsonDocument::parse(
        r#"{
            "type": "commercial_with_invoice",
            "customer_details": ["ACME"],
            "commercial": {
                "products": [{"unit_price": 500, "description": "BREAD"}],
                "payments": [{"method": "payment-cash"}],
                "customer_id": "12345678901"
            }
        }"#,
    )
    .unwrap();

    let expected = vec![
        format!("\"ACME{}\"@38F", " ".repeat(36)),
        "\"00000\"111M".to_string(),
        "\"BREAD\"500HR".to_string(),
        "\"12345678901\"@39F".to_string(),
        "1T".to_string(),
    ];
    assert_eq!(doc.encode_all().unwrap(), expected);

    let mut transport = MemoryTransport::new();
    transport.open().unwrap();
    transport.print_document(&doc).unwrap();
    assert_eq!(transport.blocks(), expected.as_slice());
    assert_eq!(transport.flushes(), 1);

    // Encoded once up front, written after connecting
    let blocks = doc.encode_all().unwrap();
    let mut transport = MemoryTransport::new();
    transport.open().unwrap();
    transport.write_blocks(&blocks).unwrap();
    assert_eq!(transport.blocks(), expected.as_slice());
}

#[test]
fn test_failed_document_writes_nothing() {
    let mut transport = MemoryTransport::new();
    transport.open().unwrap();

    let commands = vec![
        Command::from(Product::new(100)),
        Command::from(RawCommand::new(
            vec![Field::new("1.5", SeparatorKind::Value)],
            Terminator::new(TerminatorKind::Sold),
        )),
    ];
    let err = transport.print_commands(&commands).unwrap_err();
    assert!(matches!(err, ScontrinoError::InvalidNumericField(_)));
    assert!(transport.blocks().is_empty());
    assert_eq!(transport.flushes(), 0);
}
