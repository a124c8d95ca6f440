#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use contacts_api::application::services::{
    AuthService, CommentService, ContactService, EmailService, ImageService, RatingService,
    TagService, UserCache, UserService,
};
use contacts_api::domain::entities::{
    Comment, Contact, ContactData, ContactFilter, Image, ImageRating, NewComment, NewImage,
    NewUser, Rating, Role, Tag, User,
};
use contacts_api::domain::repositories::{
    CommentRepository, ContactRepository, ImageRepository, RatingRepository, TagRepository,
    UserRepository,
};
use contacts_api::error::AppError;
use contacts_api::infrastructure::cache::{CacheResult, CacheService, NullCache};
use contacts_api::infrastructure::email::{EmailError, EmailMessage, EmailSender};
use contacts_api::infrastructure::security::{
    PasswordHasher, TokenCodec, TokenLifetimes, TokenScope,
};
use contacts_api::routes::{HttpSettings, router};
use contacts_api::state::{AppState, Services};

pub const TEST_SECRET: &str = "integration-test-signing-secret";
pub const PASSWORD: &str = "correct-horse-battery";

// ─── In-memory repositories ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    fn modify<F>(&self, id: i64, f: F) -> Result<User, AppError>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?;
        f(user);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    pub fn snapshot(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_email_key" }),
            ));
        }
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_username_key" }),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: users.len() as i64 + 1,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            avatar: new_user.avatar,
            role: new_user.role,
            refresh_token: None,
            is_email_confirmed: new_user.is_email_confirmed,
            is_password_valid: true,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.snapshot(email))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.users.lock().unwrap().len() as i64)
    }

    async fn update_refresh_token(&self, id: i64, token: Option<String>) -> Result<(), AppError> {
        self.modify(id, |u| u.refresh_token = token).map(|_| ())
    }

    async fn confirm_email(&self, id: i64) -> Result<(), AppError> {
        self.modify(id, |u| u.is_email_confirmed = true).map(|_| ())
    }

    async fn set_password_valid(&self, id: i64, valid: bool) -> Result<(), AppError> {
        self.modify(id, |u| u.is_password_valid = valid).map(|_| ())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        self.modify(id, |u| {
            u.password_hash = password_hash.to_string();
            u.is_password_valid = true;
            u.refresh_token = None;
        })
        .map(|_| ())
    }

    async fn update_profile(
        &self,
        id: i64,
        username: &str,
        avatar: Option<String>,
    ) -> Result<User, AppError> {
        self.modify(id, |u| {
            u.username = username.to_string();
            if avatar.is_some() {
                u.avatar = avatar;
            }
        })
    }

    async fn set_role(&self, id: i64, role: Role) -> Result<User, AppError> {
        self.modify(id, |u| u.role = role)
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<User, AppError> {
        self.modify(id, |u| {
            u.is_active = active;
            if !active {
                u.refresh_token = None;
            }
        })
    }
}

#[derive(Default)]
pub struct MemoryContactRepository {
    contacts: Mutex<Vec<Contact>>,
    next_id: Mutex<i64>,
}

fn check_unique(
    contacts: &[Contact],
    user_id: i64,
    skip_id: Option<i64>,
    data: &ContactData,
) -> Result<(), AppError> {
    let others = contacts
        .iter()
        .filter(|c| c.user_id == user_id && Some(c.id) != skip_id);
    for c in others {
        let constraint = if c.email == data.email {
            "contacts_user_email_key"
        } else if c.phone == data.phone {
            "contacts_user_phone_key"
        } else {
            continue;
        };
        return Err(AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": constraint }),
        ));
    }
    Ok(())
}

#[async_trait]
impl ContactRepository for MemoryContactRepository {
    async fn list(
        &self,
        user_id: i64,
        filter: ContactFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Contact>, AppError> {
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id && filter.matches(c))
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn list_all(&self, user_id: i64) -> Result<Vec<Contact>, AppError> {
        self.list(user_id, ContactFilter::default(), 0, i64::MAX).await
    }

    async fn find(&self, user_id: i64, id: i64) -> Result<Option<Contact>, AppError> {
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user_id == user_id && c.id == id)
            .cloned())
    }

    async fn create(&self, user_id: i64, data: ContactData) -> Result<Contact, AppError> {
        let mut contacts = self.contacts.lock().unwrap();
        check_unique(&contacts, user_id, None, &data)?;

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;

        let now = Utc::now();
        let contact = Contact {
            id: *next_id,
            user_id,
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            phone: data.phone,
            birthday: data.birthday,
            address: data.address,
            created_at: now,
            updated_at: now,
        };
        contacts.push(contact.clone());
        Ok(contact)
    }

    async fn update(
        &self,
        user_id: i64,
        id: i64,
        data: ContactData,
    ) -> Result<Option<Contact>, AppError> {
        let mut contacts = self.contacts.lock().unwrap();
        check_unique(&contacts, user_id, Some(id), &data)?;

        let Some(contact) = contacts
            .iter_mut()
            .find(|c| c.user_id == user_id && c.id == id)
        else {
            return Ok(None);
        };

        contact.first_name = data.first_name;
        contact.last_name = data.last_name;
        contact.email = data.email;
        contact.phone = data.phone;
        contact.birthday = data.birthday;
        contact.address = data.address;
        contact.updated_at = Utc::now();
        Ok(Some(contact.clone()))
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let mut contacts = self.contacts.lock().unwrap();
        let before = contacts.len();
        contacts.retain(|c| !(c.user_id == user_id && c.id == id));
        Ok(contacts.len() != before)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.contacts.lock().unwrap().len() as i64)
    }
}

/// Images, tags, comments and ratings with the cascades of the real schema.
#[derive(Default)]
pub struct MemoryGallery {
    data: Mutex<GalleryData>,
}

#[derive(Default)]
struct GalleryData {
    next_id: i64,
    images: Vec<Image>,
    tags: Vec<Tag>,
    links: Vec<(i64, i64)>,
    comments: Vec<Comment>,
    ratings: Vec<Rating>,
}

impl GalleryData {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn with_tags(&self, image: &Image) -> Image {
        let mut titles: Vec<String> = self
            .links
            .iter()
            .filter(|(image_id, _)| *image_id == image.id)
            .filter_map(|(_, tag_id)| self.tags.iter().find(|t| t.id == *tag_id))
            .map(|t| t.title.clone())
            .collect();
        titles.sort();
        Image {
            tags: titles,
            ..image.clone()
        }
    }

    fn drop_comments(&mut self, doomed: &[i64]) {
        self.comments.retain(|c| {
            !doomed.contains(&c.id) && !c.parent_id.is_some_and(|p| doomed.contains(&p))
        });
    }
}

fn page<T: Clone>(items: impl Iterator<Item = T>, offset: i64, limit: i64) -> Vec<T> {
    items.skip(offset as usize).take(limit as usize).collect()
}

impl MemoryGallery {
    fn data(&self) -> std::sync::MutexGuard<'_, GalleryData> {
        self.data.lock().unwrap()
    }
}

#[async_trait]
impl ImageRepository for MemoryGallery {
    async fn create(&self, user_id: i64, image: NewImage) -> Result<Image, AppError> {
        let mut data = self.data();
        let now = Utc::now();
        let image = Image {
            id: data.next_id(),
            user_id,
            url: image.url,
            description: image.description,
            tags: vec![],
            created_at: now,
            updated_at: now,
        };
        data.images.push(image.clone());
        Ok(image)
    }

    async fn find(&self, id: i64) -> Result<Option<Image>, AppError> {
        let data = self.data();
        Ok(data
            .images
            .iter()
            .find(|i| i.id == id)
            .map(|i| data.with_tags(i)))
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Image>, AppError> {
        let data = self.data();
        let mine = data
            .images
            .iter()
            .rev()
            .filter(|i| i.user_id == user_id)
            .map(|i| data.with_tags(i));
        Ok(page(mine, offset, limit))
    }

    async fn update_description(
        &self,
        user_id: i64,
        id: i64,
        description: Option<String>,
    ) -> Result<Option<Image>, AppError> {
        let mut data = self.data();
        let Some(image) = data
            .images
            .iter_mut()
            .find(|i| i.id == id && i.user_id == user_id)
        else {
            return Ok(None);
        };
        image.description = description;
        image.updated_at = Utc::now();
        let image = image.clone();
        Ok(Some(data.with_tags(&image)))
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let mut data = self.data();
        let before = data.images.len();
        data.images.retain(|i| !(i.id == id && i.user_id == user_id));
        if data.images.len() == before {
            return Ok(false);
        }
        data.links.retain(|(image_id, _)| *image_id != id);
        data.ratings.retain(|r| r.image_id != id);
        data.comments.retain(|c| c.image_id != id);
        Ok(true)
    }

    async fn attach_tag(&self, image_id: i64, tag_id: i64) -> Result<(), AppError> {
        let mut data = self.data();
        if !data.links.contains(&(image_id, tag_id)) {
            data.links.push((image_id, tag_id));
        }
        Ok(())
    }

    async fn detach_tag(&self, image_id: i64, tag_id: i64) -> Result<bool, AppError> {
        let mut data = self.data();
        let before = data.links.len();
        data.links.retain(|link| *link != (image_id, tag_id));
        Ok(data.links.len() != before)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.data().images.len() as i64)
    }
}

#[async_trait]
impl TagRepository for MemoryGallery {
    async fn list(
        &self,
        search: Option<String>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Tag>, AppError> {
        let data = self.data();
        let mut tags: Vec<Tag> = data
            .tags
            .iter()
            .filter(|t| search.as_deref().is_none_or(|s| t.title.contains(s)))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(page(tags.into_iter(), offset, limit))
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Tag>, AppError> {
        Ok(self.data().tags.iter().find(|t| t.title == title).cloned())
    }

    async fn find_or_create(&self, title: &str, user_id: i64) -> Result<Tag, AppError> {
        let mut data = self.data();
        if let Some(tag) = data.tags.iter().find(|t| t.title == title) {
            return Ok(tag.clone());
        }
        let now = Utc::now();
        let tag = Tag {
            id: data.next_id(),
            title: title.to_string(),
            user_id,
            created_at: now,
            updated_at: now,
        };
        data.tags.push(tag.clone());
        Ok(tag)
    }

    async fn delete(&self, title: &str) -> Result<bool, AppError> {
        let mut data = self.data();
        let Some(id) = data.tags.iter().find(|t| t.title == title).map(|t| t.id) else {
            return Ok(false);
        };
        data.tags.retain(|t| t.id != id);
        data.links.retain(|(_, tag_id)| *tag_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for MemoryGallery {
    async fn create(&self, comment: NewComment) -> Result<Comment, AppError> {
        let mut data = self.data();
        let now = Utc::now();
        let comment = Comment {
            id: data.next_id(),
            image_id: comment.image_id,
            user_id: comment.user_id,
            parent_id: comment.parent_id,
            text: comment.text,
            created_at: now,
            updated_at: now,
        };
        data.comments.push(comment.clone());
        Ok(comment)
    }

    async fn find(&self, id: i64) -> Result<Option<Comment>, AppError> {
        Ok(self.data().comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list_for_image(
        &self,
        image_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>, AppError> {
        let data = self.data();
        let top = data
            .comments
            .iter()
            .filter(|c| c.image_id == image_id && c.parent_id.is_none())
            .cloned();
        Ok(page(top, offset, limit))
    }

    async fn list_replies(
        &self,
        parent_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>, AppError> {
        let data = self.data();
        let replies = data
            .comments
            .iter()
            .filter(|c| c.parent_id == Some(parent_id))
            .cloned();
        Ok(page(replies, offset, limit))
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>, AppError> {
        let data = self.data();
        let mine = data.comments.iter().filter(|c| c.user_id == user_id).cloned();
        Ok(page(mine, offset, limit))
    }

    async fn update_text(
        &self,
        user_id: i64,
        id: i64,
        text: &str,
    ) -> Result<Option<Comment>, AppError> {
        let mut data = self.data();
        Ok(data
            .comments
            .iter_mut()
            .find(|c| c.id == id && c.user_id == user_id)
            .map(|c| {
                c.text = text.to_string();
                c.updated_at = Utc::now();
                c.clone()
            }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut data = self.data();
        if !data.comments.iter().any(|c| c.id == id) {
            return Ok(false);
        }
        data.drop_comments(&[id]);
        Ok(true)
    }
}

#[async_trait]
impl RatingRepository for MemoryGallery {
    async fn create(&self, image_id: i64, user_id: i64, rate: i16) -> Result<Rating, AppError> {
        let mut data = self.data();
        if data
            .ratings
            .iter()
            .any(|r| r.image_id == image_id && r.user_id == user_id)
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "ratings_image_user_key" }),
            ));
        }
        let now = Utc::now();
        let rating = Rating {
            id: data.next_id(),
            image_id,
            user_id,
            rate,
            created_at: now,
            updated_at: now,
        };
        data.ratings.push(rating.clone());
        Ok(rating)
    }

    async fn list_for_image(
        &self,
        image_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Rating>, AppError> {
        let data = self.data();
        let rates = data
            .ratings
            .iter()
            .rev()
            .filter(|r| r.image_id == image_id)
            .cloned();
        Ok(page(rates, offset, limit))
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Rating>, AppError> {
        let data = self.data();
        let rates = data
            .ratings
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned();
        Ok(page(rates, offset, limit))
    }

    async fn summary(&self, image_id: i64) -> Result<ImageRating, AppError> {
        let data = self.data();
        Ok(summarize(&data.ratings, image_id))
    }

    async fn top_images(&self, offset: i64, limit: i64) -> Result<Vec<ImageRating>, AppError> {
        let data = self.data();
        let mut all: Vec<ImageRating> = data
            .images
            .iter()
            .map(|i| summarize(&data.ratings, i.id))
            .collect();
        all.sort_by(|a, b| match (a.average, b.average) {
            (Some(x), Some(y)) => y.total_cmp(&x).then(a.image_id.cmp(&b.image_id)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.image_id.cmp(&b.image_id),
        });
        Ok(page(all.into_iter(), offset, limit))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut data = self.data();
        let before = data.ratings.len();
        data.ratings.retain(|r| r.id != id);
        Ok(data.ratings.len() != before)
    }
}

fn summarize(ratings: &[Rating], image_id: i64) -> ImageRating {
    let rates: Vec<f64> = ratings
        .iter()
        .filter(|r| r.image_id == image_id)
        .map(|r| f64::from(r.rate))
        .collect();
    let count = rates.len() as i64;
    ImageRating {
        image_id,
        average: (count > 0).then(|| rates.iter().sum::<f64>() / count as f64),
        count,
    }
}

// ─── Cache and mail doubles ──────────────────────────────────────────────────

/// Remembers values forever; TTLs are ignored.
#[derive(Default)]
pub struct MemoryCache {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, _ttl_seconds: Option<u64>) -> CacheResult<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<()> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Forwards every message to the test through a channel.
pub struct RecordingEmailSender {
    tx: mpsc::UnboundedSender<EmailMessage>,
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        let _ = self.tx.send(message);
        Ok(())
    }
}

// ─── Test application ────────────────────────────────────────────────────────

pub struct TestApp {
    pub server: TestServer,
    pub tokens: TokenCodec,
    pub users: Arc<MemoryUserRepository>,
    pub contacts: Arc<MemoryContactRepository>,
    pub gallery: Arc<MemoryGallery>,
    /// The same service the handlers use, for acting outside HTTP as the
    /// admin CLI does.
    pub user_service: Arc<UserService>,
    pub mailbox: mpsc::UnboundedReceiver<EmailMessage>,
}

pub fn build_state(
    users: Arc<MemoryUserRepository>,
    contacts: Arc<MemoryContactRepository>,
    gallery: Arc<MemoryGallery>,
    cache: Arc<dyn CacheService>,
    sender: Arc<dyn EmailSender>,
    tokens: TokenCodec,
) -> AppState {
    let user_cache = UserCache::new(cache.clone(), 60);
    let email = Arc::new(EmailService::new(sender, "http://testserver"));

    let services = Services {
        auth: AuthService::new(
            users.clone(),
            user_cache.clone(),
            tokens,
            PasswordHasher::new().unwrap(),
            email,
        ),
        users: UserService::new(users, user_cache),
        contacts: ContactService::new(contacts),
        images: ImageService::new(gallery.clone(), gallery.clone()),
        tags: TagService::new(gallery.clone()),
        comments: CommentService::new(gallery.clone(), gallery.clone()),
        ratings: RatingService::new(gallery.clone(), gallery),
    };

    AppState::new(services, cache, "Contacts API")
}

fn spawn(cache: Arc<dyn CacheService>, settings: &HttpSettings) -> TestApp {
    let users = Arc::new(MemoryUserRepository::default());
    let contacts = Arc::new(MemoryContactRepository::default());
    let gallery = Arc::new(MemoryGallery::default());
    let (tx, mailbox) = mpsc::unbounded_channel();
    let tokens = TokenCodec::new(TEST_SECRET, TokenLifetimes::default());

    let state = build_state(
        users.clone(),
        contacts.clone(),
        gallery.clone(),
        cache,
        Arc::new(RecordingEmailSender { tx }),
        tokens.clone(),
    );
    let user_service = state.user_service.clone();

    let app = router(state, settings);

    TestApp {
        server: TestServer::new(app).unwrap(),
        tokens,
        users,
        contacts,
        gallery,
        user_service,
        mailbox,
    }
}

/// Application with a persistent in-memory cache.
pub fn spawn_app() -> TestApp {
    spawn(Arc::new(MemoryCache::default()), &HttpSettings::default())
}

/// Application running without a cache, as when Redis is not configured.
pub fn spawn_app_without_cache() -> TestApp {
    spawn(Arc::new(NullCache::new()), &HttpSettings::default())
}

/// Application with custom HTTP settings such as CORS origins.
pub fn spawn_app_with_settings(settings: HttpSettings) -> TestApp {
    spawn(Arc::new(MemoryCache::default()), &settings)
}

impl TestApp {
    pub async fn next_email(&mut self) -> EmailMessage {
        tokio::time::timeout(Duration::from_secs(2), self.mailbox.recv())
            .await
            .expect("no email was sent")
            .expect("mailbox closed")
    }

    /// Signs up, confirms the email with a freshly minted token and logs in.
    ///
    /// Returns the login response (`access_token`, `refresh_token`).
    pub async fn register(&self, username: &str, email: &str) -> Value {
        self.server
            .post("/api/auth/signup")
            .json(&json!({ "username": username, "email": email, "password": PASSWORD }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        let token = self
            .tokens
            .issue(email, TokenScope::EmailVerificationToken)
            .unwrap();
        self.server
            .get(&format!("/api/auth/confirm_email/{token}"))
            .await
            .assert_status_ok();

        let response = self
            .server
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": PASSWORD }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()
    }

    /// Access token for a newly registered, confirmed user.
    pub async fn access_token(&self, username: &str, email: &str) -> String {
        self.register(username, email).await["access_token"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

/// Extracts the token from a link like `{host}/api/auth/confirm_email/{token}`.
pub fn token_from_link(html: &str, path: &str) -> String {
    let start = html.find(path).expect("link not found in email") + path.len();
    html[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect()
}

pub fn contact_json(first_name: &str, email: &str, phone: &str, birthday: &str) -> Value {
    json!({
        "first_name": first_name,
        "last_name": "Tester",
        "email": email,
        "phone": phone,
        "birthday": birthday,
        "address": null
    })
}

impl TestApp {
    /// Publishes an image as the token's owner and returns its id.
    pub async fn create_image(&self, token: &str, tags: &[&str]) -> i64 {
        let response = self
            .server
            .post("/api/images")
            .authorization_bearer(token)
            .json(&json!({
                "url": "https://img.example.com/harbour.png",
                "description": "Harbour at dusk",
                "tags": tags,
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["id"].as_i64().unwrap()
    }
}
