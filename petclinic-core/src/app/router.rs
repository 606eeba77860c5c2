//! Route table for the clinic server

use hyper::Method;

use crate::ClinicError;

/// Every use case the server can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Welcome,
    Crash,
    FindOwnersForm,
    FindOwners,
    NewOwnerForm,
    CreateOwner,
    ShowOwner,
    EditOwnerForm,
    UpdateOwner,
    NewPetForm,
    CreatePet,
    EditPetForm,
    UpdatePet,
    NewVisitForm,
    CreateVisit,
    VetsHtml,
    Vets,
}

/// Single route
pub struct Route {
    pub method: Method,
    pub pattern: &'static str,
    pub endpoint: Endpoint,
}

/// Outcome of matching one request
#[derive(Debug, PartialEq)]
pub enum RouteMatch {
    Found(Endpoint, PathParams),
    /// The path exists, but not for this method
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

/// `{name}` segments captured from the path
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PathParams {
    params: Vec<(&'static str, String)>,
}

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }

    /// Integer id parameter; anything else is a bad request
    pub fn id(&self, name: &str) -> Result<u32, ClinicError> {
        let raw = self
            .get(name)
            .ok_or_else(|| ClinicError::Internal(format!("route has no '{}' parameter", name)))?;
        raw.parse()
            .map_err(|_| ClinicError::BadRequest(format!("{} must be an integer, got '{}'", name, raw)))
    }
}

/// Ordered route matcher; the first matching pattern wins
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// All clinic routes. Literal paths come before `{ownerId}` patterns.
    pub fn clinic() -> Self {
        use Endpoint::*;

        let mut router = Self::new();
        router.add_route(Method::GET, "/", Welcome);
        router.add_route(Method::GET, "/oups", Crash);
        router.add_route(Method::GET, "/owners/find", FindOwnersForm);
        router.add_route(Method::GET, "/owners", FindOwners);
        router.add_route(Method::GET, "/owners/new", NewOwnerForm);
        router.add_route(Method::POST, "/owners/new", CreateOwner);
        router.add_route(Method::GET, "/owners/{ownerId}", ShowOwner);
        router.add_route(Method::GET, "/owners/{ownerId}/edit", EditOwnerForm);
        router.add_route(Method::POST, "/owners/{ownerId}/edit", UpdateOwner);
        router.add_route(Method::GET, "/owners/{ownerId}/pets/new", NewPetForm);
        router.add_route(Method::POST, "/owners/{ownerId}/pets/new", CreatePet);
        router.add_route(Method::GET, "/owners/{ownerId}/pets/{petId}/edit", EditPetForm);
        router.add_route(Method::POST, "/owners/{ownerId}/pets/{petId}/edit", UpdatePet);
        router.add_route(Method::GET, "/owners/{ownerId}/pets/{petId}/visits/new", NewVisitForm);
        router.add_route(Method::POST, "/owners/{ownerId}/pets/{petId}/visits/new", CreateVisit);
        router.add_route(Method::GET, "/vets.html", VetsHtml);
        router.add_route(Method::GET, "/vets", Vets);
        router
    }

    pub fn add_route(&mut self, method: Method, pattern: &'static str, endpoint: Endpoint) {
        self.routes.push(Route { method, pattern, endpoint });
    }

    pub fn match_route(&self, method: &Method, path: &str) -> RouteMatch {
        let mut allowed = Vec::new();
        for route in &self.routes {
            let Some(params) = extract_params(route.pattern, path) else {
                continue;
            };
            if route.method == *method {
                return RouteMatch::Found(route.endpoint, params);
            }
            if !allowed.contains(&route.method) {
                allowed.push(route.method.clone());
            }
        }

        if allowed.is_empty() {
            RouteMatch::NotFound
        } else {
            RouteMatch::MethodNotAllowed(allowed)
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Compare pattern and path segment by segment, capturing `{name}` segments
fn extract_params(pattern: &'static str, path: &str) -> Option<PathParams> {
    let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
    let pattern_segments: Vec<&'static str> = pattern.split('/').collect();
    let path_segments: Vec<&str> = path.split('/').collect();

    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = PathParams::default();
    for (p_seg, path_seg) in pattern_segments.into_iter().zip(path_segments) {
        match p_seg.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => {
                if path_seg.is_empty() {
                    return None;
                }
                params.params.push((name, path_seg.to_string()));
            }
            None if p_seg == path_seg => {}
            None => return None,
        }
    }
    Some(params)
}
