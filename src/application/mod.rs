pub mod completion;
pub mod payments;

pub use completion::{CompletionOutcome, CompletionService, ProgressOutcome};
pub use payments::{ChargeOutcome, PaymentService};
