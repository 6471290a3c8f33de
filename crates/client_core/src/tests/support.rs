use std::{
    collections::VecDeque,
    marker::PhantomData,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use shared::{
    domain::{ProductType, RepositoryId},
    protocol::{NewProduct, Repository, RepositoryOwner, RepositorySearchResponse, SearchQuery},
};
use tokio::sync::Notify;

use crate::{
    error::{DecodeError, TransportError},
    transport::{HttpReply, RemoteCall},
};

type Decoder<O> = fn(&HttpReply) -> Result<O, DecodeError>;

/// In-process [`RemoteCall`] that replays scripted replies in order.
pub(crate) struct ScriptedCall<P, O> {
    replies: Mutex<VecDeque<Result<HttpReply, TransportError>>>,
    submitted: Arc<Mutex<Vec<P>>>,
    release: Option<Arc<Notify>>,
    decode: Decoder<O>,
    _output: PhantomData<fn() -> O>,
}

impl<P, O> ScriptedCall<P, O> {
    fn new(decode: Decoder<O>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            submitted: Arc::new(Mutex::new(Vec::new())),
            release: None,
            decode,
            _output: PhantomData,
        }
    }

    pub(crate) fn reply(self, status: u16, body: &str) -> Self {
        self.replies
            .lock()
            .expect("replies lock")
            .push_back(Ok(HttpReply::new(status, body)));
        self
    }

    pub(crate) fn fail(self, error: TransportError) -> Self {
        self.replies
            .lock()
            .expect("replies lock")
            .push_back(Err(error));
        self
    }

    /// Holds every submission until `release` is notified.
    pub(crate) fn held_by(mut self, release: Arc<Notify>) -> Self {
        self.release = Some(release);
        self
    }

    pub(crate) fn submissions(&self) -> Arc<Mutex<Vec<P>>> {
        self.submitted.clone()
    }
}

impl ScriptedCall<NewProduct, ()> {
    pub(crate) fn products() -> Self {
        Self::new(|_| Ok(()))
    }
}

impl ScriptedCall<SearchQuery, RepositorySearchResponse> {
    pub(crate) fn searches() -> Self {
        Self::new(|reply| reply.json())
    }
}

#[async_trait]
impl<P, O> RemoteCall for ScriptedCall<P, O>
where
    P: Clone + Send + Sync + 'static,
    O: Send + 'static,
{
    type Payload = P;
    type Output = O;

    async fn submit(&self, payload: &P) -> Result<HttpReply, TransportError> {
        self.submitted
            .lock()
            .expect("submissions lock")
            .push(payload.clone());
        if let Some(release) = &self.release {
            release.notified().await;
        }
        let next = self.replies.lock().expect("replies lock").pop_front();
        next.unwrap_or_else(|| Err(TransportError::Connection("no scripted reply".into())))
    }

    fn decode(&self, reply: &HttpReply) -> Result<O, DecodeError> {
        (self.decode)(reply)
    }
}

pub(crate) fn product(name: &str, size: &str) -> NewProduct {
    NewProduct {
        name: name.into(),
        size: size.into(),
        product_type: ProductType::Electronic,
    }
}

pub(crate) fn fake_repo(id: i64, name: &str) -> Repository {
    Repository {
        id: RepositoryId(id),
        name: name.into(),
        owner: RepositoryOwner {
            avatar_url: "https://avatars.githubusercontent.com/u/716546?v=4".into(),
        },
        html_url: format!("https://github.com/twisted/{name}"),
        updated_at: "2022-04-11".into(),
        stargazers_count: 43,
        forks_count: 18,
        open_issues_count: 18,
    }
}

pub(crate) fn fake_results(count: usize) -> RepositorySearchResponse {
    RepositorySearchResponse {
        total_count: count as u64,
        items: (0..count)
            .map(|index| fake_repo(index as i64 + 1, &format!("repo-{index}")))
            .collect(),
    }
}
