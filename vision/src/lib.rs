//! Client for the Computer Vision Read API.
//!
//! A read is asynchronous on the service side: [`submit`] hands over an image and gets a
//! [`JobId`] back, [`await_result`] polls that job until it reaches a terminal status and
//! flattens the recognized pages into a [`RecognitionResult`].

mod client;
mod error;
mod job;
mod poll;
mod result;
pub mod schema;
mod session;
mod source;

pub use client::{Client, ReadApi};
pub use error::{Error, Result};
pub use job::JobId;
pub use poll::{CancelToken, PollPolicy, await_result, extract, submit};
pub use result::{Outcome, Page, RecognitionResult};
pub use schema::OperationStatus;
pub use session::{ReadOptions, Session};
pub use source::ImageSource;
