// ============================================================================
// TEST DOUBLES - Transport en memoria para tests nativos
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

use super::http::{ApiError, HttpRequest, HttpResponse, HttpTransport, Method};

enum Reply {
    Ready(HttpResponse),
    Held(Gate),
}

/// Respuesta retenida hasta que el test llama a `release`
#[derive(Clone, Default)]
pub struct Gate {
    waiting: Rc<RefCell<Vec<oneshot::Sender<HttpResponse>>>>,
}

impl Gate {
    pub fn release(&self, status: u16, body: &str) {
        for sender in self.waiting.borrow_mut().drain(..) {
            let _ = sender.send(HttpResponse { status, body: body.to_string() });
        }
    }

    pub fn waiting(&self) -> usize {
        self.waiting.borrow().len()
    }
}

#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<Vec<(Method, String, Reply)>>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Respuesta fija para `method path` (reemplaza la anterior)
    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) {
        self.route(method, path, Reply::Ready(HttpResponse { status, body: body.to_string() }));
    }

    /// Deja pendientes los requests a `method path`
    pub fn hold(&self, method: Method, path: &str) -> Gate {
        let gate = Gate::default();
        self.route(method, path, Reply::Held(gate.clone()));
        gate
    }

    fn route(&self, method: Method, path: &str, reply: Reply) {
        let mut routes = self.routes.borrow_mut();
        routes.retain(|(m, p, _)| !(*m == method && p == path));
        routes.push((method, path.to_string(), reply));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.sent.borrow().last().cloned()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.sent
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url.ends_with(path))
            .count()
    }
}

impl HttpTransport for MockTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, ApiError>> {
        let reply = self
            .routes
            .borrow()
            .iter()
            .find(|(method, path, _)| *method == request.method && request.url.ends_with(path.as_str()))
            .map(|(_, _, reply)| match reply {
                Reply::Ready(response) => Ok(response.clone()),
                Reply::Held(gate) => {
                    let (sender, receiver) = oneshot::channel();
                    gate.waiting.borrow_mut().push(sender);
                    Err(receiver)
                }
            });
        let url = request.url.clone();
        self.sent.borrow_mut().push(request);

        Box::pin(async move {
            match reply {
                Some(Ok(response)) => Ok(response),
                Some(Err(receiver)) => receiver
                    .await
                    .map_err(|_| ApiError::Network("request dropped".to_string())),
                None => Err(ApiError::Network(format!("no route for {}", url))),
            }
        })
    }
}
