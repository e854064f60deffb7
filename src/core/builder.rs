use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::billing::compute_summary;
use super::error::BillError;
use super::types::*;
use super::words::amount_in_words;

/// Builder for constructing tax invoices directly (without an order record).
///
/// ```
/// use chrono::NaiveDate;
/// use gstbill::core::*;
/// use rust_decimal_macros::dec;
///
/// let invoice = InvoiceBuilder::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .invoice_number("RB/24-25/0001")
///     .order_reference("ORD-88112")
///     .vendor(VendorBuilder::new("Packwell Traders", "27AAPFU0939F1ZV", "Maharashtra").build())
///     .customer(CustomerBuilder::new("Cafe Nirvana", "12 MG Road, Pune 411001").build())
///     .add_line(LineItemBuilder::new("Kraft paper box", dec!(12.50), 200).gst(dec!(18)).build())
///     .shipping(dec!(120))
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.summary.grand_total, dec!(3070.00));
/// ```
pub struct InvoiceBuilder {
    issue_date: NaiveDate,
    invoice_number: Option<String>,
    order_reference: Option<String>,
    order_date: Option<NaiveDate>,
    order_status: Option<String>,
    payment_mode: Option<String>,
    payment_status: Option<String>,
    vendor: Option<Vendor>,
    customer: Option<Customer>,
    lines: Vec<LineItem>,
    shipping: Decimal,
    coupon_code: Option<String>,
    coupon_discount: Decimal,
}

impl InvoiceBuilder {
    pub fn new(issue_date: NaiveDate) -> Self {
        Self {
            issue_date,
            invoice_number: None,
            order_reference: None,
            order_date: None,
            order_status: None,
            payment_mode: None,
            payment_status: None,
            vendor: None,
            customer: None,
            lines: Vec::new(),
            shipping: Decimal::ZERO,
            coupon_code: None,
            coupon_discount: Decimal::ZERO,
        }
    }

    /// Compliance invoice number from the vendor's series.
    pub fn invoice_number(mut self, number: impl Into<String>) -> Self {
        self.invoice_number = Some(number.into());
        self
    }

    /// Order reference. Doubles as the invoice label when no compliance
    /// number was issued.
    pub fn order_reference(mut self, reference: impl Into<String>) -> Self {
        self.order_reference = Some(reference.into());
        self
    }

    pub fn order_date(mut self, date: NaiveDate) -> Self {
        self.order_date = Some(date);
        self
    }

    pub fn order_status(mut self, status: impl Into<String>) -> Self {
        self.order_status = Some(status.into());
        self
    }

    pub fn payment_mode(mut self, mode: impl Into<String>) -> Self {
        self.payment_mode = Some(mode.into());
        self
    }

    pub fn payment_status(mut self, status: impl Into<String>) -> Self {
        self.payment_status = Some(status.into());
        self
    }

    pub fn vendor(mut self, vendor: Vendor) -> Self {
        self.vendor = Some(vendor);
        self
    }

    pub fn customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    pub fn shipping(mut self, charge: Decimal) -> Self {
        self.shipping = charge;
        self
    }

    pub fn coupon(mut self, code: impl Into<String>, discount: Decimal) -> Self {
        self.coupon_code = Some(code.into());
        self.coupon_discount = discount;
        self
    }

    /// Build the invoice, running the billing engine and deriving the
    /// amount in words.
    ///
    /// # Errors
    ///
    /// [`BillError::MissingOrderIdentifier`] when neither an invoice number
    /// nor an order reference was supplied; [`BillError::InvalidOrder`] for
    /// a missing vendor/customer or an empty/malformed line set.
    pub fn build(self) -> Result<InvoiceDocument, BillError> {
        let vendor = self
            .vendor
            .ok_or_else(|| BillError::InvalidOrder("vendor is required".into()))?;
        let customer = self
            .customer
            .ok_or_else(|| BillError::InvalidOrder("customer is required".into()))?;

        let invoice_number = match (&self.invoice_number, &self.order_reference) {
            (Some(n), _) => InvoiceNumber::Sequenced(n.clone()),
            (None, Some(r)) => InvoiceNumber::FromOrder(r.clone()),
            (None, None) => return Err(BillError::MissingOrderIdentifier),
        };

        let summary = compute_summary(&self.lines, self.shipping, self.coupon_discount)?;
        let words = amount_in_words(summary.grand_total);

        Ok(InvoiceDocument {
            invoice_number,
            issue_date: self.issue_date,
            order_date: self.order_date,
            order_reference: self
                .order_reference
                .unwrap_or_else(|| "N/A".to_string()),
            order_status: self.order_status,
            payment_mode: self.payment_mode,
            payment_status: self.payment_status,
            vendor,
            customer,
            lines: self.lines,
            summary,
            amount_in_words: words,
            coupon_code: self.coupon_code,
        })
    }
}

/// Builder for a billable line.
pub struct LineItemBuilder {
    name: String,
    unit_price: Decimal,
    quantity: u32,
    tax_rate: Decimal,
    subtotal: Option<Decimal>,
    tax_amount: Option<Decimal>,
}

impl LineItemBuilder {
    pub fn new(name: impl Into<String>, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
            tax_rate: Decimal::ZERO,
            subtotal: None,
            tax_amount: None,
        }
    }

    /// GST rate in percent.
    pub fn gst(mut self, rate: Decimal) -> Self {
        self.tax_rate = rate;
        self
    }

    /// Stored net amount from the order record (overrides derivation).
    pub fn stored_subtotal(mut self, amount: Decimal) -> Self {
        self.subtotal = Some(amount);
        self
    }

    /// Stored GST amount from the order record (overrides derivation).
    pub fn stored_tax(mut self, amount: Decimal) -> Self {
        self.tax_amount = Some(amount);
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            name: self.name,
            unit_price: self.unit_price,
            quantity: self.quantity,
            tax_rate: self.tax_rate,
            subtotal: self.subtotal,
            tax_amount: self.tax_amount,
        }
    }
}

/// Builder for the selling vendor.
pub struct VendorBuilder {
    business_name: String,
    gstin: String,
    state: String,
    bank: Option<BankDetails>,
}

impl VendorBuilder {
    pub fn new(
        business_name: impl Into<String>,
        gstin: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            business_name: business_name.into(),
            gstin: gstin.into(),
            state: state.into(),
            bank: None,
        }
    }

    pub fn bank(mut self, bank: BankDetails) -> Self {
        self.bank = Some(bank);
        self
    }

    pub fn build(self) -> Vendor {
        Vendor {
            business_name: self.business_name,
            gstin: self.gstin,
            state: self.state,
            bank: self.bank,
        }
    }
}

/// Builder for the buyer.
pub struct CustomerBuilder {
    name: String,
    address: String,
    gstin: Option<String>,
}

impl CustomerBuilder {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            gstin: None,
        }
    }

    pub fn gstin(mut self, gstin: impl Into<String>) -> Self {
        self.gstin = Some(gstin.into());
        self
    }

    pub fn build(self) -> Customer {
        Customer {
            name: self.name,
            address: self.address,
            gstin: self.gstin,
        }
    }
}
