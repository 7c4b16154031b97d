/// One repository as reported by the listing endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoDescriptor {
    pub name: String,
    pub clone_url: String,
    pub fork: bool,
}

/// A single page of the listing. `next` is the page to request after this
/// one, or `None` on the last page.
#[derive(Clone, Debug, Default)]
pub struct RepoPage {
    pub items: Vec<RepoDescriptor>,
    pub next: Option<u32>,
}
