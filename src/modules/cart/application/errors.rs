use crate::modules::cart::adapters::outbound::cart_snapshot::SnapshotError;
use crate::modules::cart::core::decision::DecideError;
use crate::modules::cart::core::ports::GatewayError;
use std::fmt;
use thiserror::Error;

pub const OUT_OF_STOCK_MESSAGE: &str = "requested quantity out of stock";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    AddProduct,
    RemoveProduct,
    UpdateProductAmount,
}

impl CartOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            CartOperation::AddProduct => "add_product",
            CartOperation::RemoveProduct => "remove_product",
            CartOperation::UpdateProductAmount => "update_product_amount",
        }
    }

    /// Generic message shown for any failure other than insufficient stock.
    pub fn failure_message(self) -> &'static str {
        match self {
            CartOperation::AddProduct => "error adding product",
            CartOperation::RemoveProduct => "error removing product",
            CartOperation::UpdateProductAmount => "error updating product quantity",
        }
    }
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartErrorKind {
    OutOfStock,
    NotInCart,
    Unexpected,
}

#[derive(Debug, Error)]
pub enum CartError {
    #[error(transparent)]
    Rejected(#[from] DecideError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl CartError {
    pub fn kind(&self) -> CartErrorKind {
        match self {
            CartError::Rejected(DecideError::OutOfStock { .. }) => CartErrorKind::OutOfStock,
            CartError::Rejected(DecideError::NotInCart { .. }) => CartErrorKind::NotInCart,
            CartError::Rejected(DecideError::AlreadyInCart { .. })
            | CartError::Rejected(DecideError::AmountOverflow { .. })
            | CartError::Gateway(_)
            | CartError::Snapshot(_) => CartErrorKind::Unexpected,
        }
    }
}

/// A failed cart operation: which operation answered, and why.
///
/// When adding a product already in the cart, the answering operation is the
/// amount update it delegates to.
#[derive(Debug, Error)]
#[error("{operation} failed: {source}")]
pub struct CartFailure {
    pub operation: CartOperation,
    pub source: CartError,
}

impl CartFailure {
    pub fn new(operation: CartOperation, source: CartError) -> Self {
        Self { operation, source }
    }

    pub fn kind(&self) -> CartErrorKind {
        self.source.kind()
    }

    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            CartErrorKind::OutOfStock => OUT_OF_STOCK_MESSAGE,
            CartErrorKind::NotInCart | CartErrorKind::Unexpected => {
                self.operation.failure_message()
            }
        }
    }
}
