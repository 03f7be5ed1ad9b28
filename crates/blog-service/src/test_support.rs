//! In-memory implementations of the repository, cache and queue traits for tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use blog_common::JwtService;
use blog_core::traits::{
    BlogCache, BlogRepository, CommentRepository, UserCommentRepository, UserRepository,
};
use blog_core::{
    Blog, BlogId, Comment, CommentDetails, CommentId, DomainError, Page, PageRequest, RepoResult,
    User, UserComment, UserId,
};
use blog_queue::{Enqueue, EnqueueOptions, QueueError, QueueResult, TaskInfo, TaskState};
use chrono::Utc;
use parking_lot::Mutex;

use crate::services::ServiceContext;
use crate::tasks::CommentTaskDistributor;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-unit-tests";

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, (User, String)>,
    blogs: Vec<Blog>,
    comments: Vec<Comment>,
    likes: HashSet<(UserId, CommentId)>,
}

/// One store backing every repository trait, so joins such as comment
/// details and like counts see the same data
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    /// Make every subsequent write fail with a database error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> RepoResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(DomainError::DatabaseError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    /// Insert a comment (and nothing else) and return its id
    pub fn seed_comment(&self) -> CommentId {
        let comment = Comment::new(
            CommentId::new(),
            UserId::new(),
            BlogId::new(),
            "a seeded comment message".to_string(),
        );
        let id = comment.id;
        self.tables.lock().comments.push(comment);
        id
    }

    fn details(tables: &Tables, comment: &Comment) -> CommentDetails {
        let (author, avatar_url) = tables
            .users
            .get(&comment.author_id)
            .map(|(u, _)| (u.full_name(), u.avatar.clone()))
            .unwrap_or_default();
        let likes = tables
            .likes
            .iter()
            .filter(|(_, c)| *c == comment.id)
            .count();

        CommentDetails {
            comment: comment.clone(),
            author,
            avatar_url,
            likes: i64::try_from(likes).unwrap_or(i64::MAX),
        }
    }

    fn page<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        let slice = items.iter().skip(offset).take(limit).cloned().collect();
        Page::new(slice, i64::try_from(items.len()).unwrap_or(i64::MAX), page)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.tables.lock().users.get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = User::normalize_email(email);
        Ok(self
            .tables
            .lock()
            .users
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        self.check_writable()?;
        let mut tables = self.tables.lock();
        if tables.users.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        tables
            .users
            .insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self.tables.lock().users.get(&id).map(|(_, h)| h.clone()))
    }

    async fn touch_login(&self, id: UserId) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        let (user, _) = tables
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.login_date = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn find_by_id(&self, id: BlogId) -> RepoResult<Option<Blog>> {
        Ok(self.tables.lock().blogs.iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self, page: PageRequest) -> RepoResult<Page<Blog>> {
        let tables = self.tables.lock();
        let mut blogs = tables.blogs.clone();
        blogs.sort_by_key(|b| (b.created_at, b.id));
        Ok(Self::page(&blogs, page))
    }

    async fn create(&self, blog: &Blog) -> RepoResult<()> {
        self.check_writable()?;
        let mut tables = self.tables.lock();
        if !tables.users.contains_key(&blog.author_id) {
            return Err(DomainError::UserNotFound(blog.author_id));
        }
        tables.blogs.push(blog.clone());
        Ok(())
    }

    async fn update(&self, blog: &Blog) -> RepoResult<()> {
        self.check_writable()?;
        let mut tables = self.tables.lock();
        let stored = tables
            .blogs
            .iter_mut()
            .find(|b| b.id == blog.id)
            .ok_or(DomainError::BlogNotFound(blog.id))?;
        *stored = blog.clone();
        Ok(())
    }

    async fn delete(&self, id: BlogId) -> RepoResult<bool> {
        self.check_writable()?;
        let mut tables = self.tables.lock();
        let before = tables.blogs.len();
        tables.blogs.retain(|b| b.id != id);
        let removed = tables.blogs.len() < before;
        if removed {
            let orphaned: HashSet<CommentId> = tables
                .comments
                .iter()
                .filter(|c| c.blog_id == id)
                .map(|c| c.id)
                .collect();
            tables.comments.retain(|c| c.blog_id != id);
            tables.likes.retain(|(_, c)| !orphaned.contains(c));
        }
        Ok(removed)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<CommentDetails>> {
        let tables = self.tables.lock();
        Ok(tables
            .comments
            .iter()
            .find(|c| c.id == id)
            .map(|c| Self::details(&tables, c)))
    }

    async fn list_by_blog(
        &self,
        blog_id: BlogId,
        page: PageRequest,
    ) -> RepoResult<Page<CommentDetails>> {
        let tables = self.tables.lock();
        let mut comments: Vec<CommentDetails> = tables
            .comments
            .iter()
            .filter(|c| c.blog_id == blog_id)
            .map(|c| Self::details(&tables, c))
            .collect();
        comments.sort_by_key(|d| (d.comment.updated_at, d.comment.id));
        Ok(Self::page(&comments, page))
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.check_writable()?;
        let mut tables = self.tables.lock();
        if !tables.blogs.iter().any(|b| b.id == comment.blog_id) {
            return Err(DomainError::BlogNotFound(comment.blog_id));
        }
        tables.comments.push(comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        self.check_writable()?;
        let mut tables = self.tables.lock();
        let stored = tables
            .comments
            .iter_mut()
            .find(|c| c.id == comment.id)
            .ok_or(DomainError::CommentNotFound(comment.id))?;
        *stored = comment.clone();
        Ok(())
    }

    async fn delete(&self, id: CommentId) -> RepoResult<bool> {
        self.check_writable()?;
        let mut tables = self.tables.lock();
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        tables.likes.retain(|(_, c)| *c != id);
        Ok(tables.comments.len() < before)
    }
}

#[async_trait]
impl UserCommentRepository for InMemoryStore {
    async fn find(&self, user_id: UserId, comment_id: CommentId) -> RepoResult<Option<UserComment>> {
        Ok(self
            .tables
            .lock()
            .likes
            .contains(&(user_id, comment_id))
            .then(|| UserComment::new(user_id, comment_id)))
    }

    async fn insert_if_absent(&self, like: &UserComment) -> RepoResult<bool> {
        self.check_writable()?;
        let mut tables = self.tables.lock();
        if !tables.comments.iter().any(|c| c.id == like.comment_id) {
            return Err(DomainError::CommentNotFound(like.comment_id));
        }
        Ok(tables.likes.insert((like.user_id, like.comment_id)))
    }

    async fn delete_if_present(&self, user_id: UserId, comment_id: CommentId) -> RepoResult<bool> {
        self.check_writable()?;
        Ok(self.tables.lock().likes.remove(&(user_id, comment_id)))
    }

    async fn count_by_comment(&self, comment_id: CommentId) -> RepoResult<i64> {
        let tables = self.tables.lock();
        let count = tables.likes.iter().filter(|(_, c)| *c == comment_id).count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

/// Blog cache that records hits and can be switched to failing
#[derive(Default)]
pub struct InMemoryBlogCache {
    entries: Mutex<HashMap<BlogId, Blog>>,
    failing: AtomicBool,
    hits: AtomicUsize,
}

impl InMemoryBlogCache {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn contains(&self, id: BlogId) -> bool {
        self.entries.lock().contains_key(&id)
    }

    fn check(&self) -> RepoResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(DomainError::CacheError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BlogCache for InMemoryBlogCache {
    async fn get(&self, id: BlogId) -> RepoResult<Option<Blog>> {
        self.check()?;
        let found = self.entries.lock().get(&id).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
        Ok(found)
    }

    async fn set(&self, blog: &Blog) -> RepoResult<()> {
        self.check()?;
        self.entries.lock().insert(blog.id, blog.clone());
        Ok(())
    }

    async fn invalidate(&self, id: BlogId) -> RepoResult<()> {
        self.check()?;
        self.entries.lock().remove(&id);
        Ok(())
    }
}

/// One enqueue seen by [`RecordingQueue`]
#[derive(Debug, Clone)]
pub struct RecordedTask {
    pub type_name: &'static str,
    pub payload: Vec<u8>,
    pub options: EnqueueOptions,
}

/// Queue that keeps every enqueued task in memory and never runs them
#[derive(Default)]
pub struct RecordingQueue {
    tasks: Mutex<Vec<RecordedTask>>,
    failing: AtomicBool,
}

impl RecordingQueue {
    /// Make every subsequent enqueue fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn tasks(&self) -> Vec<RecordedTask> {
        self.tasks.lock().clone()
    }
}

#[async_trait]
impl Enqueue for RecordingQueue {
    async fn enqueue_raw(
        &self,
        type_name: &'static str,
        payload: &[u8],
        opts: &EnqueueOptions,
    ) -> QueueResult<TaskInfo> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(QueueError::Config("queue unavailable".to_string()));
        }
        self.tasks.lock().push(RecordedTask {
            type_name,
            payload: payload.to_vec(),
            options: opts.clone(),
        });

        let delay = chrono::Duration::from_std(opts.process_in).unwrap_or_else(|_| chrono::Duration::zero());
        Ok(TaskInfo {
            id: uuid::Uuid::new_v4().to_string(),
            type_name: type_name.to_string(),
            queue: opts.queue.clone(),
            max_retry: opts.max_retry,
            retried: 0,
            state: if opts.process_in.is_zero() {
                TaskState::Pending
            } else {
                TaskState::Scheduled
            },
            next_process_at: Utc::now() + delay,
        })
    }
}

/// A context wired to in-memory fakes, plus handles to inspect them
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub store: Arc<InMemoryStore>,
    pub cache: Arc<InMemoryBlogCache>,
    pub queue: Arc<RecordingQueue>,
}

impl TestHarness {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());
        let cache = Arc::new(InMemoryBlogCache::default());
        let queue = Arc::new(RecordingQueue::default());

        let ctx = ServiceContext::builder()
            .user_repo(store.clone())
            .blog_repo(store.clone())
            .comment_repo(store.clone())
            .user_comment_repo(store.clone())
            .blog_cache(cache.clone())
            .jwt_service(Arc::new(JwtService::new(TEST_JWT_SECRET, 900, 604_800)))
            .distributor(CommentTaskDistributor::new(queue.clone()))
            .build()
            .expect("all dependencies provided");

        Self {
            ctx,
            store,
            cache,
            queue,
        }
    }

    /// Insert a user directly, bypassing registration
    pub async fn user(&self) -> User {
        let user = User::new(
            UserId::new(),
            "Test".to_string(),
            "User".to_string(),
            format!("{}@example.com", UserId::new()),
        );
        UserRepository::create(self.store.as_ref(), &user, "not-a-real-hash")
            .await
            .expect("seed user");
        user
    }

    /// Insert a blog owned by `author`
    pub async fn blog(&self, author: UserId) -> Blog {
        let blog = Blog::new(
            BlogId::new(),
            author,
            "A seeded blog title".to_string(),
            "Seeded blog content that is long enough".to_string(),
        );
        BlogRepository::create(self.store.as_ref(), &blog)
            .await
            .expect("seed blog");
        blog
    }
}
