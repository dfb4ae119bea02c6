mod http_transaction_search;

pub use http_transaction_search::{HttpTransactionSearch, NoopTransactionSearch};
