/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::args::Args;
use crate::rest::client::Client;
use crate::rest::errors::FlickrError;
use crate::rest::response::Response;
use futures::lock::Mutex;
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock, OnceLock};

/// First segment of every method name
pub const ROOT_SEGMENT: &str = "flickr";

static SHARED: OnceLock<Arc<Namespace>> = OnceLock::new();
static BUILD_GATE: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

#[derive(Debug)]
struct NodeData {
    path: String,
    children: BTreeMap<String, usize>,
    methods: BTreeMap<String, String>,
}

impl NodeData {
    fn new(path: String) -> Self {
        Self {
            path,
            children: BTreeMap::new(),
            methods: BTreeMap::new(),
        }
    }
}

/// Tree of method namespaces built from the method catalog.
///
/// Nodes live in one arena and refer to their children by index. The tree is
/// never modified after [`Namespace::build`] returns.
#[derive(Debug)]
pub struct Namespace {
    nodes: Vec<NodeData>,
}

impl Namespace {
    /// Builds the tree from dotted method names such as `flickr.people.getPhotos`.
    ///
    /// Shared prefixes resolve to one node, repeated names are ignored. A name
    /// outside the `flickr` root fails the whole build.
    pub fn build<I, S>(catalog: I) -> Result<Self, FlickrError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut endpoints: Vec<String> = catalog
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        endpoints.sort();

        let mut tree = Self {
            nodes: vec![NodeData::new(ROOT_SEGMENT.to_string())],
        };
        for endpoint in &endpoints {
            let mut breadcrumbs: Vec<&str> = endpoint.split('.').collect();
            let tail = breadcrumbs.pop().unwrap_or_default();
            if breadcrumbs.first() != Some(&ROOT_SEGMENT)
                || tail.is_empty()
                || breadcrumbs.iter().any(|s| s.is_empty())
            {
                return Err(FlickrError::InvalidNamespace(endpoint.clone()));
            }

            let mut id = 0;
            for segment in &breadcrumbs[1..] {
                id = tree.child_or_insert(id, segment);
            }
            tree.nodes[id]
                .methods
                .entry(tail.to_string())
                .or_insert_with(|| endpoint.clone());
        }
        log::debug!(
            "Built namespace tree with {} nodes from {} methods",
            tree.nodes.len(),
            endpoints.len()
        );
        Ok(tree)
    }

    fn child_or_insert(&mut self, parent: usize, segment: &str) -> usize {
        if let Some(&id) = self.nodes[parent].children.get(segment) {
            return id;
        }
        let id = self.nodes.len();
        let path = format!("{}.{}", self.nodes[parent].path, segment);
        self.nodes.push(NodeData::new(path));
        self.nodes[parent].children.insert(segment.to_string(), id);
        id
    }

    /// Returns the process wide tree, building it on first use.
    ///
    /// Concurrent first callers wait on one gate so `retrieve` runs once.
    /// `retrieve` must not go through the shared tree itself.
    pub async fn shared<F, Fut>(retrieve: F) -> Result<Arc<Namespace>, FlickrError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<String>, FlickrError>>,
    {
        if let Some(tree) = SHARED.get() {
            return Ok(tree.clone());
        }

        let _gate = BUILD_GATE.lock().await;
        if let Some(tree) = SHARED.get() {
            return Ok(tree.clone());
        }
        let tree = Arc::new(Namespace::build(retrieve().await?)?);
        Ok(SHARED.get_or_init(|| tree).clone())
    }

    /// The process wide tree if it was already built
    pub fn shared_if_built() -> Option<Arc<Namespace>> {
        SHARED.get().cloned()
    }

    pub fn root(&self) -> Node<'_> {
        Node { tree: self, id: 0 }
    }

    /// Node at a dotted path, with or without the leading `flickr`
    pub fn node(&self, path: &str) -> Option<Node<'_>> {
        segments(path).try_fold(self.root(), |node, seg| node.child(seg))
    }

    /// Endpoint identifier for a dotted method path
    pub fn endpoint(&self, path: &str) -> Option<&str> {
        let (namespace, tail) = match path.rsplit_once('.') {
            Some((namespace, tail)) => (self.node(namespace)?, tail),
            None => (self.root(), path),
        };
        namespace.method(tail)
    }

    /// Every endpoint identifier in the tree, sorted
    pub fn endpoints(&self) -> Vec<&str> {
        let mut all: Vec<&str> = self
            .nodes
            .iter()
            .flat_map(|n| n.methods.values().map(String::as_str))
            .collect();
        all.sort_unstable();
        all
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.strip_prefix(ROOT_SEGMENT).map_or(path, |rest| {
        if rest.is_empty() || rest.starts_with('.') {
            rest
        } else {
            path
        }
    });
    path.split('.').filter(|s| !s.is_empty())
}

/// Read only view of one namespace
#[derive(Clone, Copy)]
pub struct Node<'a> {
    tree: &'a Namespace,
    id: usize,
}

impl<'a> Node<'a> {
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id]
    }

    /// Last segment of the path
    pub fn name(&self) -> &'a str {
        let path = self.path();
        path.rsplit_once('.').map_or(path, |(_, name)| name)
    }

    /// Full dotted path, `flickr` for the root
    pub fn path(&self) -> &'a str {
        &self.data().path
    }

    pub fn child(&self, segment: &str) -> Option<Node<'a>> {
        self.data().children.get(segment).map(|&id| Node {
            tree: self.tree,
            id,
        })
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let tree = self.tree;
        self.data()
            .children
            .values()
            .map(move |&id| Node { tree, id })
    }

    /// Endpoint identifier bound to a leaf of this namespace
    pub fn method(&self, name: &str) -> Option<&'a str> {
        self.data().methods.get(name).map(String::as_str)
    }

    /// (leaf name, endpoint identifier) pairs
    pub fn methods(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.data()
            .methods
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node").field("path", &self.path()).finish()
    }
}

/// A namespace bound to the client that will make the calls
#[derive(Debug, Clone, Copy)]
pub struct Scope<'c> {
    client: &'c Client,
    node: Node<'c>,
}

impl<'c> Scope<'c> {
    pub(crate) fn new(client: &'c Client, node: Node<'c>) -> Self {
        Self { client, node }
    }

    pub fn node(&self) -> Node<'c> {
        self.node
    }

    /// Descends into a child namespace
    pub fn ns(&self, segment: &str) -> Result<Scope<'c>, FlickrError> {
        self.node
            .child(segment)
            .map(|node| Scope::new(self.client, node))
            .ok_or_else(|| {
                FlickrError::UnknownNamespace(format!("{}.{}", self.node.path(), segment))
            })
    }

    /// Resolves a leaf of this namespace
    pub fn method(&self, name: &str) -> Result<Method<'c>, FlickrError> {
        self.node
            .method(name)
            .map(|endpoint| Method::new(self.client, endpoint))
            .ok_or_else(|| FlickrError::UnknownMethod(format!("{}.{}", self.node.path(), name)))
    }

    /// Resolves and invokes a leaf in one step
    pub async fn call(&self, name: &str, args: Args) -> Result<Response, FlickrError> {
        self.method(name)?.call(args).await
    }
}

/// A leaf bound to its endpoint identifier and client
#[derive(Debug, Clone, Copy)]
pub struct Method<'c> {
    client: &'c Client,
    endpoint: &'c str,
}

impl<'c> Method<'c> {
    pub(crate) fn new(client: &'c Client, endpoint: &'c str) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &'c str {
        self.endpoint
    }

    pub async fn call(&self, args: Args) -> Result<Response, FlickrError> {
        self.client.call(self.endpoint, args).await
    }
}
