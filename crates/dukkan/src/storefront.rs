//! The state behind one shopper's visit: a catalog, a cart and checkout

use std::path::PathBuf;

use dukkan_core::{
    cart::Cart,
    catalog::Catalog,
    order::{CartLine, Customer, DiscountPolicy, OrderTotals},
    DukkanError, Result,
};

use crate::renderer::InvoiceSink;

/// A shopping session that issues invoices through `S`
#[derive(Debug)]
pub struct Storefront<S> {
    catalog: Catalog,
    cart: Cart,
    policy: DiscountPolicy,
    sink: S,
}

impl<S: InvoiceSink> Storefront<S> {
    pub fn new(sink: S) -> Self {
        Self::with_policy(sink, DiscountPolicy::default())
    }

    pub fn with_policy(sink: S, policy: DiscountPolicy) -> Self {
        Self {
            catalog: Catalog::default(),
            cart: Cart::new(),
            policy,
            sink,
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Adds `quantity` of the catalog product at `index` as a new line
    pub fn add_product(&mut self, index: usize, quantity: u32) -> Result<()> {
        let product = self.catalog.require(index)?;
        self.cart.add_line(product.to_line(quantity))
    }

    pub fn add_line(&mut self, line: CartLine) -> Result<()> {
        self.cart.add_line(line)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn totals(&self) -> OrderTotals {
        self.cart.totals(&self.policy)
    }

    /// Whether checkout is offered at all
    pub fn can_checkout(&self) -> bool {
        !self.cart.is_empty()
    }

    /// Issues an invoice for the current cart
    ///
    /// An empty cart is refused before the customer is looked at, and a
    /// customer with any blank field is refused before anything is written.
    /// The cart keeps its lines afterwards.
    pub fn checkout(&self, customer: &Customer) -> Result<PathBuf> {
        if !self.can_checkout() {
            return Err(DukkanError::EmptyCart);
        }
        customer.validate()?;

        let totals = self.totals();
        log::info!(
            "Checkout: {} lines, payable {}",
            self.cart.len(),
            totals.payable
        );
        self.sink.issue(customer, self.cart.lines(), &totals)
    }
}
