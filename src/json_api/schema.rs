//! JSON schema types for the document API.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::protocol::terminator::TerminatorKind;

/// Top-level JSON document, tagged by `"type"`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonDocument {
    Commercial(JsonCommercial),
    Management(JsonManagement),
    CommercialReturn(JsonCommercialReversal),
    CommercialCancellation(JsonCommercialReversal),
    PosReturn(JsonPosReversal),
    PosCancellation(JsonPosReversal),
    Invoice(JsonInvoice),
    CommercialWithInvoice(JsonCommercialWithInvoice),
}

/// A sold product. Prices are in cents.
#[derive(Debug, Deserialize)]
pub struct JsonProduct {
    pub unit_price: u64,
    pub description: Option<String>,
    pub quantity: Option<u32>,
    pub department: Option<u32>,
}

/// A payment. `method` is a terminator name such as `"payment-cash"`.
#[derive(Debug, Deserialize)]
pub struct JsonPayment {
    pub method: TerminatorKind,
    pub amount: Option<u64>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JsonCommercial {
    pub products: Vec<JsonProduct>,
    #[serde(default)]
    pub payments: Vec<JsonPayment>,
    pub discount_amount: Option<u64>,
    pub discount_percentage: Option<f64>,
    /// Tax code, VAT number or lottery code
    pub customer_id: Option<String>,
    pub trailer: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JsonManagement {
    pub rows: Vec<String>,
}

/// Identifier of the document being returned or cancelled.
#[derive(Debug, Deserialize)]
pub struct JsonDocumentId {
    pub daily_closure: u32,
    pub number: u32,
    /// ISO date, e.g. `"2024-03-01"`
    pub date: NaiveDate,
    pub printer_serial: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JsonCommercialReversal {
    pub document: JsonDocumentId,
    pub product: Option<JsonProduct>,
    pub payment: Option<JsonPayment>,
}

#[derive(Debug, Deserialize)]
pub struct JsonPosReversal {
    pub date: NaiveDate,
    pub product: Option<JsonProduct>,
    pub payment: Option<JsonPayment>,
}

#[derive(Debug, Deserialize)]
pub struct JsonInvoice {
    /// Omit to let the printer number the invoice
    pub number: Option<u32>,
    pub customer_details: Vec<String>,
    pub products: Vec<JsonProduct>,
    pub payments: Vec<JsonPayment>,
}

#[derive(Debug, Deserialize)]
pub struct JsonCommercialWithInvoice {
    pub number: Option<u32>,
    pub customer_details: Vec<String>,
    pub commercial: JsonCommercial,
}
