use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::DateTime;
use chrono::Utc;
use forum_service::domain::post::errors::PostError;
use forum_service::domain::post::models::Comment;
use forum_service::domain::post::models::Post;
use forum_service::domain::post::models::PostId;
use forum_service::domain::post::ports::CommentRepository;
use forum_service::domain::post::ports::PostRepository;
use forum_service::domain::post::service::PostService;
use forum_service::domain::topic::errors::TopicError;
use forum_service::domain::topic::models::Topic;
use forum_service::domain::topic::models::TopicId;
use forum_service::domain::topic::ports::TopicRepository;
use forum_service::domain::topic::service::TopicService;
use forum_service::domain::user::errors::UserError;
use forum_service::domain::user::models::User;
use forum_service::domain::user::models::Username;
use forum_service::domain::user::ports::UserRepository;
use forum_service::domain::user::service::UserService;
use forum_service::inbound::http::router::create_router;

/// Test application backed by in-memory repositories; the router,
/// middleware, domain services, and authenticator are the real ones.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub topics: Arc<InMemoryTopicRepository>,
    pub posts: Arc<InMemoryPostRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(InMemoryUserRepository::default());
        let topic_repository = Arc::new(InMemoryTopicRepository::default());
        let post_repository = Arc::new(InMemoryPostRepository::default());
        let comment_repository = Arc::new(InMemoryCommentRepository::default());

        let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
        let topic_service = Arc::new(TopicService::new(
            Arc::clone(&topic_repository),
            Arc::clone(&user_repository),
        ));
        let post_service = Arc::new(PostService::new(
            Arc::clone(&post_repository),
            Arc::clone(&comment_repository),
            Arc::clone(&user_repository),
            Arc::clone(&topic_repository),
        ));

        let authenticator = Arc::new(Authenticator::with_generated_key());

        let router = create_router(user_service, topic_service, post_service, authenticator, 24);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            topics: topic_repository,
            posts: post_repository,
        }
    }

    /// Insert a topic directly into storage and return its identifier.
    pub fn seed_topic(&self, title: &str, description: &str) -> TopicId {
        let topic = Topic {
            id: TopicId::new(),
            title: title.to_string(),
            description: description.to_string(),
        };
        let id = topic.id;
        self.topics.insert(topic);
        id
    }

    /// Backdate a stored post so feed ordering is deterministic.
    pub fn backdate_post(&self, post_id: &PostId, created_at: DateTime<Utc>) {
        self.posts.set_created_at(post_id, created_at);
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the issued token.
    pub async fn register_user(&self, username: &str, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/register")
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token in response")
            .to_string()
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.to_string(),
            ));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == *username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.username == *username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.email.as_str() == email))
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.username.to_string())),
        }
    }
}

#[derive(Default)]
pub struct InMemoryTopicRepository {
    topics: Mutex<Vec<Topic>>,
}

impl InMemoryTopicRepository {
    pub fn insert(&self, topic: Topic) {
        self.topics.lock().unwrap().push(topic);
    }
}

#[async_trait]
impl TopicRepository for InMemoryTopicRepository {
    async fn find_by_id(&self, id: &TopicId) -> Result<Option<Topic>, TopicError> {
        let topics = self.topics.lock().unwrap();
        Ok(topics.iter().find(|t| t.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Topic>, TopicError> {
        let mut topics = self.topics.lock().unwrap().clone();
        topics.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(topics)
    }
}

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn set_created_at(&self, post_id: &PostId, created_at: DateTime<Utc>) {
        let mut posts = self.posts.lock().unwrap();
        if let Some(post) = posts.iter_mut().find(|p| p.id == *post_id) {
            post.created_at = created_at;
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().find(|p| p.id == *id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn find_by_topics_newest_first(
        &self,
        topics: &[TopicId],
    ) -> Result<Vec<Post>, PostError> {
        let wanted: HashSet<TopicId> = topics.iter().copied().collect();
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| wanted.contains(&p.topic_id))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}

#[derive(Default)]
pub struct InMemoryCommentRepository {
    comments: Mutex<Vec<Comment>>,
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: Comment) -> Result<Comment, PostError> {
        self.comments.lock().unwrap().push(comment.clone());
        Ok(comment)
    }

    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, PostError> {
        let mut comments: Vec<Comment> = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == *post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }
}
