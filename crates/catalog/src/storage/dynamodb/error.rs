//! DynamoDB error mapping.
//!
//! Every SDK failure becomes a `RepositoryError`. Requests that never got a
//! response are connection failures; service errors are classified into a
//! small set of faults with stable messages.

use std::error::Error as StdError;
use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use catalog_core::storage::RepositoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fault {
    MissingTable,
    Throughput,
    RequestLimit,
    CollectionLimit,
    TransactionConflict,
    Internal,
    Other,
}

impl Fault {
    fn message(self) -> Option<&'static str> {
        match self {
            Self::MissingTable => Some("Table not found"),
            Self::Throughput => Some("Throughput exceeded, please retry"),
            Self::RequestLimit => Some("Request limit exceeded, please retry"),
            Self::CollectionLimit => Some("Item collection size limit exceeded"),
            Self::TransactionConflict => Some("Transaction conflict, please retry"),
            Self::Internal => Some("DynamoDB internal server error"),
            Self::Other => None,
        }
    }
}

/// Operation errors the repository knows how to classify.
pub(crate) trait Classify: StdError + Send + Sync + 'static {
    fn fault(&self) -> Fault;
}

macro_rules! classify_read_errors {
    ($($error:ty),+ $(,)?) => {
        $(
            impl Classify for $error {
                fn fault(&self) -> Fault {
                    if self.is_resource_not_found_exception() {
                        Fault::MissingTable
                    } else if self.is_provisioned_throughput_exceeded_exception() {
                        Fault::Throughput
                    } else if self.is_request_limit_exceeded() {
                        Fault::RequestLimit
                    } else if self.is_internal_server_error() {
                        Fault::Internal
                    } else {
                        Fault::Other
                    }
                }
            }
        )+
    };
}

// Writes can also hit item-collection limits and transaction conflicts.
macro_rules! classify_write_errors {
    ($($error:ty),+ $(,)?) => {
        $(
            impl Classify for $error {
                fn fault(&self) -> Fault {
                    if self.is_resource_not_found_exception() {
                        Fault::MissingTable
                    } else if self.is_provisioned_throughput_exceeded_exception() {
                        Fault::Throughput
                    } else if self.is_request_limit_exceeded() {
                        Fault::RequestLimit
                    } else if self.is_item_collection_size_limit_exceeded_exception() {
                        Fault::CollectionLimit
                    } else if self.is_transaction_conflict_exception() {
                        Fault::TransactionConflict
                    } else if self.is_internal_server_error() {
                        Fault::Internal
                    } else {
                        Fault::Other
                    }
                }
            }
        )+
    };
}

classify_read_errors!(GetItemError, ScanError, QueryError);
classify_write_errors!(PutItemError, UpdateItemError, DeleteItemError);

/// Map an SDK error from `operation` (e.g. `"GetItem"`) to a `RepositoryError`.
pub(crate) fn map_sdk_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> RepositoryError
where
    E: Classify,
    R: Debug,
{
    if matches!(err, SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)) {
        return RepositoryError::ConnectionFailed(DisplayErrorContext(&err).to_string());
    }

    let message = err
        .as_service_error()
        .map(|service| service.fault())
        .and_then(Fault::message);

    match message {
        Some(message) => RepositoryError::QueryFailed(message.to_string()),
        None => RepositoryError::QueryFailed(format!(
            "{operation} failed: {}",
            DisplayErrorContext(&err)
        )),
    }
}
