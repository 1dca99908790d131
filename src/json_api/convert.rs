//! Conversion from JSON schema types to documents.
//!
//! Every value goes through the regular catalog constructors, so a JSON
//! document is validated exactly like one built in Rust.

use crate::document::{
    Commercial, CommercialReversal, CommercialWithInvoice, Document, DocumentId, Invoice,
    Management, PosReversal,
};
use crate::error::Result;
use crate::protocol::commands::{
    CustomerIdentifier, DiscountAmount, DiscountPercentage, InvoiceDetails, OpenInvoice,
    OpenInvoiceCommercialDocument, Payment, Product, Trailer,
};

use super::schema::*;

impl JsonDocument {
    /// Parse and convert in one step.
    pub fn parse(json: &str) -> Result<Document> {
        let doc: JsonDocument = serde_json::from_str(json)?;
        doc.to_document()
    }

    /// Convert this JSON document to a [`Document`].
    pub fn to_document(&self) -> Result<Document> {
        let document = match self {
            JsonDocument::Commercial(c) => Document::from(c.to_commercial()?),
            JsonDocument::Management(m) => Document::from(Management::new(&m.rows)),
            JsonDocument::CommercialReturn(r) => Document::from(r.to_reversal(
                CommercialReversal::commercial_return(r.document.to_id()),
            )?),
            JsonDocument::CommercialCancellation(r) => Document::from(
                r.to_reversal(CommercialReversal::cancellation(r.document.to_id()))?,
            ),
            JsonDocument::PosReturn(r) => {
                Document::from(r.to_reversal(PosReversal::pos_return(r.date))?)
            }
            JsonDocument::PosCancellation(r) => {
                Document::from(r.to_reversal(PosReversal::cancellation(r.date))?)
            }
            JsonDocument::Invoice(i) => Document::from(Invoice::new(
                OpenInvoice::new(i.number),
                to_details(&i.customer_details),
                i.products.iter().map(JsonProduct::to_product).collect(),
                to_payments(&i.payments)?,
            )?),
            JsonDocument::CommercialWithInvoice(i) => {
                Document::from(CommercialWithInvoice::new(
                    OpenInvoiceCommercialDocument::new(i.number),
                    to_details(&i.customer_details),
                    i.commercial.to_commercial()?,
                )?)
            }
        };
        Ok(document)
    }
}

fn to_details(lines: &[String]) -> Vec<InvoiceDetails> {
    lines.iter().map(|line| InvoiceDetails::new(line)).collect()
}

fn to_payments(payments: &[JsonPayment]) -> Result<Vec<Payment>> {
    payments.iter().map(JsonPayment::to_payment).collect()
}

impl JsonProduct {
    fn to_product(&self) -> Product {
        let mut product = Product::new(self.unit_price);
        if let Some(description) = &self.description {
            product = product.description(description);
        }
        if let Some(quantity) = self.quantity {
            product = product.quantity(quantity);
        }
        if let Some(department) = self.department {
            product = product.department(department);
        }
        product
    }
}

impl JsonPayment {
    fn to_payment(&self) -> Result<Payment> {
        let mut payment = Payment::new(self.method)?;
        if let Some(amount) = self.amount {
            payment = payment.amount(amount);
        }
        if let Some(description) = &self.description {
            payment = payment.description(description);
        }
        Ok(payment)
    }
}

impl JsonCommercial {
    fn to_commercial(&self) -> Result<Commercial> {
        let mut commercial = Commercial::new(
            self.products.iter().map(JsonProduct::to_product).collect(),
            to_payments(&self.payments)?,
        );
        if let Some(amount) = self.discount_amount {
            commercial = commercial.discount_amount(DiscountAmount::new(amount));
        }
        if let Some(percentage) = self.discount_percentage {
            commercial = commercial.discount_percentage(DiscountPercentage::new(percentage));
        }
        if let Some(id) = &self.customer_id {
            commercial = commercial.customer_id(CustomerIdentifier::new(id)?);
        }
        if let Some(trailer) = &self.trailer {
            commercial = commercial.trailer(Trailer::new(trailer));
        }
        Ok(commercial)
    }
}

impl JsonDocumentId {
    fn to_id(&self) -> DocumentId {
        DocumentId::new(
            self.daily_closure,
            self.number,
            self.date,
            self.printer_serial.as_deref(),
        )
    }
}

impl JsonCommercialReversal {
    fn to_reversal(&self, mut reversal: CommercialReversal) -> Result<CommercialReversal> {
        if let Some(product) = &self.product {
            reversal = reversal.product(product.to_product());
        }
        if let Some(payment) = &self.payment {
            reversal = reversal.payment(payment.to_payment()?);
        }
        Ok(reversal)
    }
}

impl JsonPosReversal {
    fn to_reversal(&self, mut reversal: PosReversal) -> Result<PosReversal> {
        if let Some(product) = &self.product {
            reversal = reversal.product(product.to_product());
        }
        if let Some(payment) = &self.payment {
            reversal = reversal.payment(payment.to_payment()?);
        }
        Ok(reversal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScontrinoError;

    #[test]
    fn test_commercial() {
        let doc = JsonDocument::parse(
            r#"{
                "type": "commercial",
                "products": [{"unit_price": 750, "description": "BREAD", "quantity": 2, "department": 3}],
                "payments": [{"method": "payment-cash"}],
                "discount_amount": 100
            }"#,
        )
        .unwrap();
        assert_eq!(doc.kind(), "commercial");
        assert_eq!(doc.encode().unwrap(), vec!["\"BREAD\"2*750H3R", "100H3M", "1T"]);
    }

    #[test]
    fn test_management() {
        let doc = JsonDocument::parse(r#"{"type": "management", "rows": ["a"]}"#).unwrap();
        assert_eq!(doc.encode().unwrap(), vec!["j", "\"a\"@", "J"]);
    }

    #[test]
    fn test_reversals() {
        let doc = JsonDocument::parse(
            r#"{
                "type": "commercial_cancellation",
                "document": {"daily_closure": 12, "number": 23, "date": "2018-01-01", "printer_serial": "SN"}
            }"#,
        )
        .unwrap();
        assert_eq!(doc.encode().unwrap(), vec!["\"0012-0023-01-01-18-SN\"105M"]);

        let doc = JsonDocument::parse(
            r#"{
                "type": "pos_return",
                "date": "2018-01-31",
                "product": {"unit_price": 500},
                "payment": {"method": "payment-cards", "amount": 500}
            }"#,
        )
        .unwrap();
        assert_eq!(
            doc.encode().unwrap(),
            vec!["\"01-31-18/POS\"106M", "500HR", "500H3T"]
        );
    }

    #[test]
    fn test_invoice_validation_surfaces() {
        let err = JsonDocument::parse(
            r#"{
                "type": "invoice",
                "customer_details": [],
                "products": [{"unit_price": 1}],
                "payments": [{"method": "payment-cash"}]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScontrinoError::InvalidCustomerDetailsCount(0)));
    }

    #[test]
    fn test_non_payment_method_rejected() {
        let err = JsonDocument::parse(
            r#"{"type": "commercial", "products": [], "payments": [{"method": "sold"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScontrinoError::InvalidPaymentMethod(_)));
    }

    #[test]
    fn test_unknown_type_is_json_error() {
        let err = JsonDocument::parse(r#"{"type": "receipt"}"#).unwrap_err();
        assert!(matches!(err, ScontrinoError::Json(_)));
    }
}
