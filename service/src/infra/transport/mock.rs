//! Scripted [`Transport`] for tests.

use std::{collections::VecDeque, future, io, sync::Arc};

use http::StatusCode;
use parking_lot::Mutex;
use tracerr::Traced;

use super::{Error, Request, Response, Transport};

/// [`Transport`] replaying pre-recorded [`Response`]s and capturing every
/// [`Request`] it receives.
#[derive(Clone, Debug, Default)]
pub(crate) struct Scripted {
    /// Responses to be returned, in order.
    replies: Arc<Mutex<VecDeque<Reply>>>,

    /// Captured requests.
    requests: Arc<Mutex<Vec<Request>>>,
}

/// Scheduled outcome of a [`Request`].
#[derive(Debug)]
enum Reply {
    /// Server answers with the [`Response`].
    Respond(Response),

    /// Connection is refused.
    Fail,

    /// Server never answers.
    Hang,
}

impl Scripted {
    /// Schedules a [`Response`] with the provided status and JSON body.
    pub(crate) fn respond(&self, status: u16, body: impl ToString) -> &Self {
        self.replies.lock().push_back(Reply::Respond(Response {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: body.to_string().into_bytes(),
        }));
        self
    }

    /// Schedules a connection failure.
    pub(crate) fn fail(&self) -> &Self {
        self.replies.lock().push_back(Reply::Fail);
        self
    }

    /// Schedules a [`Request`] that never gets answered.
    pub(crate) fn hang(&self) -> &Self {
        self.replies.lock().push_back(Reply::Hang);
        self
    }

    /// Returns all the captured [`Request`]s.
    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// Returns the last captured [`Request`].
    pub(crate) fn last_request(&self) -> Request {
        self.requests.lock().last().cloned().expect("no requests")
    }
}

impl Transport<Request> for Scripted {
    type Ok = Response;
    type Err = Traced<Error>;

    async fn execute(&self, req: Request) -> Result<Self::Ok, Self::Err> {
        self.requests.lock().push(req);
        let reply = self.replies.lock().pop_front().expect("unexpected request");
        match reply {
            Reply::Respond(resp) => Ok(resp),
            Reply::Fail => Err(tracerr::new!(Error::Io(
                io::ErrorKind::ConnectionRefused.into()
            ))),
            Reply::Hang => future::pending().await,
        }
    }
}
