//! Content and photo contracts consumed by the page and the admin panel.
//!
//! The page only reads and always has a fallback. The admin panel writes, and
//! never shows a change before the service confirmed it.

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

pub type ContentMap = FnvHashMap<String, Option<String>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CmsError {
    #[error("content service unavailable")]
    Unavailable,
    #[error("not signed in as admin")]
    Unauthorized,
    #[error("photo {0} not found")]
    PhotoNotFound(u32),
    #[error("rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub key: String,
    pub section: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: u32,
    pub section: String,
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPhoto {
    pub section: String,
    pub src: String,
    pub alt: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub order: i32,
}

impl NewPhoto {
    pub fn with_id(self, id: u32) -> Photo {
        Photo {
            id,
            section: self.section,
            src: self.src,
            alt: self.alt,
            title: self.title,
            category: self.category,
            description: self.description,
            order: self.order,
        }
    }
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoPatch {
    pub section: Option<String>,
    pub src: Option<String>,
    pub alt: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
}

impl PhotoPatch {
    pub fn apply_to(&self, photo: &mut Photo) {
        if let Some(v) = &self.section {
            photo.section = v.clone();
        }
        if let Some(v) = &self.src {
            photo.src = v.clone();
        }
        if let Some(v) = &self.alt {
            photo.alt = Some(v.clone());
        }
        if let Some(v) = &self.title {
            photo.title = Some(v.clone());
        }
        if let Some(v) = &self.category {
            photo.category = Some(v.clone());
        }
        if let Some(v) = &self.description {
            photo.description = Some(v.clone());
        }
        if let Some(v) = self.order {
            photo.order = v;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
}

pub trait CmsRead {
    fn content(&self) -> Result<ContentMap, CmsError>;
    /// Photos sorted by `order`.
    fn photos(&self) -> Result<Vec<Photo>, CmsError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    UpdateContent {
        key: String,
        section: String,
        value: String,
    },
    AddPhoto(NewPhoto),
    UpdatePhoto {
        id: u32,
        patch: PhotoPatch,
    },
    DeletePhoto(u32),
}

impl Mutation {
    fn describe(&self) -> String {
        match self {
            Mutation::UpdateContent { key, .. } => format!("content '{key}'"),
            Mutation::AddPhoto(p) => format!("new photo in '{}'", p.section),
            Mutation::UpdatePhoto { id, .. } => format!("photo {id}"),
            Mutation::DeletePhoto(id) => format!("deletion of photo {id}"),
        }
    }
}

pub trait CmsWrite {
    fn update_content(&mut self, key: &str, section: &str, value: &str) -> Result<(), CmsError>;
    /// Returns the id assigned to the new photo.
    fn add_photo(&mut self, photo: NewPhoto) -> Result<u32, CmsError>;
    fn update_photo(&mut self, id: u32, patch: &PhotoPatch) -> Result<(), CmsError>;
    fn delete_photo(&mut self, id: u32) -> Result<(), CmsError>;

    /// Run one mutation; `Ok(Some(id))` for additions.
    fn execute(&mut self, mutation: &Mutation) -> Result<Option<u32>, CmsError> {
        match mutation {
            Mutation::UpdateContent {
                key,
                section,
                value,
            } => self.update_content(key, section, value).map(|_| None),
            Mutation::AddPhoto(p) => self.add_photo(p.clone()).map(Some),
            Mutation::UpdatePhoto { id, patch } => self.update_photo(*id, patch).map(|_| None),
            Mutation::DeletePhoto(id) => self.delete_photo(*id).map(|_| None),
        }
    }
}

pub trait Auth {
    fn me(&self) -> Option<User>;
    fn logout(&mut self) -> Result<(), CmsError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
}

/// Admin views are only reachable by signed-in admins.
pub fn guard_admin(me: Option<&User>) -> RouteDecision {
    match me {
        Some(user) if user.role == Role::Admin => RouteDecision::Allow,
        _ => RouteDecision::RedirectToLogin,
    }
}

/// Page-side content lookup. A failed or empty fetch is just "use the
/// built-in copy".
#[derive(Debug, Clone, Default)]
pub struct ContentView {
    map: Option<ContentMap>,
}

impl ContentView {
    pub fn new(map: Option<ContentMap>) -> Self {
        Self { map }
    }

    pub fn from_source(source: &impl CmsRead) -> Self {
        match source.content() {
            Ok(map) => Self::new(Some(map)),
            Err(e) => {
                log::warn!("[cms] content unavailable, using fallback copy: {}", e);
                Self::new(None)
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.map.is_some()
    }

    pub fn text<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.map
            .as_ref()
            .and_then(|m| m.get(key))
            .and_then(|v| v.as_deref())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(fallback)
    }
}

/// Photos for one section in display order, or the fallback set when the
/// service returned nothing usable.
pub fn select_photos(photos: Option<&[Photo]>, section: &str, fallback: &[Photo]) -> Vec<Photo> {
    let mut chosen: Vec<Photo> = photos
        .unwrap_or_default()
        .iter()
        .filter(|p| p.section == section)
        .cloned()
        .collect();
    if chosen.is_empty() {
        return fallback.to_vec();
    }
    chosen.sort_by_key(|p| (p.order, p.id));
    chosen
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Saved(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingMutation {
    pub id: u64,
    pub mutation: Mutation,
}

/// Admin panel state. Displayed content changes only after the service
/// confirms a write; failures leave it untouched and raise a notice.
#[derive(Debug, Default)]
pub struct AdminSession {
    content: ContentMap,
    photos: Vec<Photo>,
    pending: Vec<u64>,
    next_id: u64,
    notices: Vec<Notice>,
}

impl AdminSession {
    pub fn new(content: ContentMap, mut photos: Vec<Photo>) -> Self {
        photos.sort_by_key(|p| (p.order, p.id));
        Self {
            content,
            photos,
            ..Self::default()
        }
    }

    pub fn load(source: &impl CmsRead) -> Self {
        let content = source.content().unwrap_or_else(|e| {
            log::warn!("[admin] content load failed: {}", e);
            ContentMap::default()
        });
        let photos = source.photos().unwrap_or_else(|e| {
            log::warn!("[admin] photo load failed: {}", e);
            Vec::new()
        });
        Self::new(content, photos)
    }

    pub fn content(&self) -> &ContentMap {
        &self.content
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn begin(&mut self, mutation: Mutation) -> PendingMutation {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(id);
        PendingMutation { id, mutation }
    }

    /// Commit or drop a pending mutation. Unknown or already settled
    /// mutations are ignored and return `None`.
    pub fn settle(
        &mut self,
        pending: PendingMutation,
        result: Result<Option<u32>, CmsError>,
    ) -> Option<&Notice> {
        let idx = self.pending.iter().position(|id| *id == pending.id)?;
        self.pending.remove(idx);
        let what = pending.mutation.describe();
        let notice = match result {
            Ok(new_id) => {
                self.commit(pending.mutation, new_id);
                Notice::Saved(format!("Saved {what}"))
            }
            Err(e) => {
                log::warn!("[admin] {} failed: {}", what, e);
                Notice::Failed(format!("Could not save {what}: {e}"))
            }
        };
        self.notices.push(notice);
        self.notices.last()
    }

    /// Begin, execute against a synchronous writer and settle.
    pub fn apply(&mut self, mutation: Mutation, writer: &mut impl CmsWrite) -> bool {
        let result = writer.execute(&mutation);
        let ok = result.is_ok();
        let pending = self.begin(mutation);
        self.settle(pending, result);
        ok
    }

    fn commit(&mut self, mutation: Mutation, new_id: Option<u32>) {
        match mutation {
            Mutation::UpdateContent { key, value, .. } => {
                self.content.insert(key, Some(value));
            }
            Mutation::AddPhoto(photo) => match new_id {
                Some(id) => {
                    self.photos.push(photo.with_id(id));
                    self.photos.sort_by_key(|p| (p.order, p.id));
                }
                None => log::info!("[admin] photo saved without id; reload to display it"),
            },
            Mutation::UpdatePhoto { id, patch } => {
                if let Some(p) = self.photos.iter_mut().find(|p| p.id == id) {
                    patch.apply_to(p);
                }
                self.photos.sort_by_key(|p| (p.order, p.id));
            }
            Mutation::DeletePhoto(id) => self.photos.retain(|p| p.id != id),
        }
    }
}

/// In-memory content service used by the native preview and tests.
#[derive(Debug, Default)]
pub struct MemoryCms {
    entries: FnvHashMap<String, ContentEntry>,
    photos: Vec<Photo>,
    next_photo_id: u32,
    session: Option<User>,
    offline: bool,
    reject_writes: bool,
}

impl MemoryCms {
    pub fn new() -> Self {
        Self {
            next_photo_id: 1,
            ..Self::default()
        }
    }

    pub fn sign_in(&mut self, user: User) {
        self.session = Some(user);
    }

    /// Reads fail with `Unavailable` while offline.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn set_reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    pub fn entry(&self, key: &str) -> Option<&ContentEntry> {
        self.entries.get(key)
    }

    fn check_write(&self) -> Result<(), CmsError> {
        if guard_admin(self.session.as_ref()) != RouteDecision::Allow {
            return Err(CmsError::Unauthorized);
        }
        if self.offline {
            return Err(CmsError::Unavailable);
        }
        if self.reject_writes {
            return Err(CmsError::Rejected("write refused".into()));
        }
        Ok(())
    }
}

impl CmsRead for MemoryCms {
    fn content(&self) -> Result<ContentMap, CmsError> {
        if self.offline {
            return Err(CmsError::Unavailable);
        }
        Ok(self
            .entries
            .values()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect())
    }

    fn photos(&self) -> Result<Vec<Photo>, CmsError> {
        if self.offline {
            return Err(CmsError::Unavailable);
        }
        let mut photos = self.photos.clone();
        photos.sort_by_key(|p| (p.order, p.id));
        Ok(photos)
    }
}

impl CmsWrite for MemoryCms {
    /// Upsert by key; the section is only recorded on insert.
    fn update_content(&mut self, key: &str, section: &str, value: &str) -> Result<(), CmsError> {
        self.check_write()?;
        self.entries
            .entry(key.to_string())
            .and_modify(|e| e.value = Some(value.to_string()))
            .or_insert_with(|| ContentEntry {
                key: key.to_string(),
                section: section.to_string(),
                value: Some(value.to_string()),
            });
        Ok(())
    }

    fn add_photo(&mut self, photo: NewPhoto) -> Result<u32, CmsError> {
        self.check_write()?;
        let id = self.next_photo_id.max(1);
        self.next_photo_id = id + 1;
        self.photos.push(photo.with_id(id));
        Ok(id)
    }

    fn update_photo(&mut self, id: u32, patch: &PhotoPatch) -> Result<(), CmsError> {
        self.check_write()?;
        let photo = self
            .photos
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CmsError::PhotoNotFound(id))?;
        patch.apply_to(photo);
        Ok(())
    }

    fn delete_photo(&mut self, id: u32) -> Result<(), CmsError> {
        self.check_write()?;
        let before = self.photos.len();
        self.photos.retain(|p| p.id != id);
        if self.photos.len() == before {
            return Err(CmsError::PhotoNotFound(id));
        }
        Ok(())
    }
}

impl Auth for MemoryCms {
    fn me(&self) -> Option<User> {
        self.session.clone()
    }

    fn logout(&mut self) -> Result<(), CmsError> {
        self.session = None;
        Ok(())
    }
}
