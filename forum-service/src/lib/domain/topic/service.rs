use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::topic::errors::TopicError;
use crate::domain::topic::models::Topic;
use crate::domain::topic::models::TopicId;
use crate::domain::topic::ports::TopicRepository;
use crate::domain::topic::ports::TopicServicePort;
use crate::user::models::Username;
use crate::user::ports::UserRepository;

/// Domain service for topics and the user subscription set.
///
/// Subscriptions live on the user aggregate, so every membership change is
/// a read-modify-write of the owning user record.
pub struct TopicService<TR, UR>
where
    TR: TopicRepository,
    UR: UserRepository,
{
    topic_repository: Arc<TR>,
    user_repository: Arc<UR>,
}

impl<TR, UR> TopicService<TR, UR>
where
    TR: TopicRepository,
    UR: UserRepository,
{
    pub fn new(topic_repository: Arc<TR>, user_repository: Arc<UR>) -> Self {
        Self {
            topic_repository,
            user_repository,
        }
    }
}

#[async_trait]
impl<TR, UR> TopicServicePort for TopicService<TR, UR>
where
    TR: TopicRepository,
    UR: UserRepository,
{
    async fn list_topics(&self) -> Result<Vec<Topic>, TopicError> {
        self.topic_repository.list_all().await
    }

    async fn subscribe(&self, topic_id: &TopicId, username: &Username) -> Result<(), TopicError> {
        let mut user = self
            .user_repository
            .find_by_username(username)
            .await
            .map_err(TopicError::from)?
            .ok_or_else(|| TopicError::UserNotFound(username.to_string()))?;

        let topic = self
            .topic_repository
            .find_by_id(topic_id)
            .await?
            .ok_or_else(|| TopicError::NotFound(topic_id.to_string()))?;

        if user.subscriptions.insert(topic.id) {
            self.user_repository
                .update(user)
                .await
                .map_err(TopicError::from)?;
        }

        Ok(())
    }

    async fn unsubscribe(&self, topic_id: &TopicId, username: &Username) -> Result<(), TopicError> {
        let mut user = self
            .user_repository
            .find_by_username(username)
            .await
            .map_err(TopicError::from)?
            .ok_or_else(|| TopicError::UserNotFound(username.to_string()))?;

        // The topic must exist even though it plays no further part in the
        // removal; a stale id is reported, not ignored.
        self.topic_repository
            .find_by_id(topic_id)
            .await?
            .ok_or_else(|| TopicError::NotFound(topic_id.to_string()))?;

        if user.subscriptions.remove(topic_id) {
            self.user_repository
                .update(user)
                .await
                .map_err(TopicError::from)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::user::errors::UserError;

    mock! {
        pub TestTopicRepository {}

        #[async_trait]
        impl TopicRepository for TestTopicRepository {
            async fn find_by_id(&self, id: &TopicId) -> Result<Option<Topic>, TopicError>;
            async fn list_all(&self) -> Result<Vec<Topic>, TopicError>;
        }
    }

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn exists_by_username(&self, username: &Username) -> Result<bool, UserError>;
            async fn exists_by_email(&self, email: &str) -> Result<bool, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
        }
    }

    fn test_user(subscriptions: HashSet<TopicId>) -> User {
        User {
            id: UserId::new(),
            username: Username::new("john".to_string()).unwrap(),
            email: EmailAddress::new("john@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            subscriptions,
            created_at: Utc::now(),
        }
    }

    fn test_topic(id: TopicId) -> Topic {
        Topic {
            id,
            title: "Tech".to_string(),
            description: "All things tech".to_string(),
        }
    }

    #[tokio::test]
    async fn test_subscribe_adds_topic_to_set() {
        let mut topic_repository = MockTestTopicRepository::new();
        let mut user_repository = MockTestUserRepository::new();

        let topic_id = TopicId::new();
        let user = test_user(HashSet::new());
        user_repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        topic_repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(test_topic(topic_id))));
        user_repository
            .expect_update()
            .withf(move |u| u.subscriptions.contains(&topic_id) && u.subscriptions.len() == 1)
            .times(1)
            .returning(|u| Ok(u));

        let service = TopicService::new(Arc::new(topic_repository), Arc::new(user_repository));

        let username = Username::new("john".to_string()).unwrap();
        service.subscribe(&topic_id, &username).await.unwrap();
    }

    #[tokio::test]
    async fn test_subscribe_already_subscribed_is_a_no_op() {
        let mut topic_repository = MockTestTopicRepository::new();
        let mut user_repository = MockTestUserRepository::new();

        let topic_id = TopicId::new();
        let user = test_user(HashSet::from([topic_id]));
        user_repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        topic_repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(test_topic(topic_id))));
        // No write when the pair already exists
        user_repository.expect_update().times(0);

        let service = TopicService::new(Arc::new(topic_repository), Arc::new(user_repository));

        let username = Username::new("john".to_string()).unwrap();
        service.subscribe(&topic_id, &username).await.unwrap();
    }

    #[tokio::test]
    async fn test_subscribe_missing_user() {
        let mut topic_repository = MockTestTopicRepository::new();
        let mut user_repository = MockTestUserRepository::new();

        user_repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        topic_repository.expect_find_by_id().times(0);

        let service = TopicService::new(Arc::new(topic_repository), Arc::new(user_repository));

        let username = Username::new("ghost".to_string()).unwrap();
        let result = service.subscribe(&TopicId::new(), &username).await;
        assert!(matches!(result.unwrap_err(), TopicError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_subscribe_missing_topic() {
        let mut topic_repository = MockTestTopicRepository::new();
        let mut user_repository = MockTestUserRepository::new();

        let user = test_user(HashSet::new());
        user_repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        topic_repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        user_repository.expect_update().times(0);

        let service = TopicService::new(Arc::new(topic_repository), Arc::new(user_repository));

        let username = Username::new("john".to_string()).unwrap();
        let result = service.subscribe(&TopicId::new(), &username).await;
        assert!(matches!(result.unwrap_err(), TopicError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unsubscribe_removes_topic_from_set() {
        let mut topic_repository = MockTestTopicRepository::new();
        let mut user_repository = MockTestUserRepository::new();

        let topic_id = TopicId::new();
        let user = test_user(HashSet::from([topic_id]));
        user_repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        topic_repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(test_topic(topic_id))));
        user_repository
            .expect_update()
            .withf(|u| u.subscriptions.is_empty())
            .times(1)
            .returning(|u| Ok(u));

        let service = TopicService::new(Arc::new(topic_repository), Arc::new(user_repository));

        let username = Username::new("john".to_string()).unwrap();
        service.unsubscribe(&topic_id, &username).await.unwrap();
    }

    #[tokio::test]
    async fn test_unsubscribe_not_subscribed_is_a_no_op() {
        let mut topic_repository = MockTestTopicRepository::new();
        let mut user_repository = MockTestUserRepository::new();

        let topic_id = TopicId::new();
        let user = test_user(HashSet::new());
        user_repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        topic_repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(test_topic(topic_id))));
        user_repository.expect_update().times(0);

        let service = TopicService::new(Arc::new(topic_repository), Arc::new(user_repository));

        let username = Username::new("john".to_string()).unwrap();
        service.unsubscribe(&topic_id, &username).await.unwrap();
    }

    #[tokio::test]
    async fn test_unsubscribe_missing_topic_is_not_found() {
        let mut topic_repository = MockTestTopicRepository::new();
        let mut user_repository = MockTestUserRepository::new();

        let user = test_user(HashSet::new());
        user_repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        topic_repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        user_repository.expect_update().times(0);

        let service = TopicService::new(Arc::new(topic_repository), Arc::new(user_repository));

        let username = Username::new("john".to_string()).unwrap();
        let result = service.unsubscribe(&TopicId::new(), &username).await;
        assert!(matches!(result.unwrap_err(), TopicError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unsubscribe_missing_user() {
        let mut topic_repository = MockTestTopicRepository::new();
        let mut user_repository = MockTestUserRepository::new();

        user_repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        topic_repository.expect_find_by_id().times(0);

        let service = TopicService::new(Arc::new(topic_repository), Arc::new(user_repository));

        let username = Username::new("ghost".to_string()).unwrap();
        let result = service.unsubscribe(&TopicId::new(), &username).await;
        assert!(matches!(result.unwrap_err(), TopicError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_list_topics() {
        let mut topic_repository = MockTestTopicRepository::new();
        let user_repository = MockTestUserRepository::new();

        topic_repository.expect_list_all().times(1).returning(|| {
            Ok(vec![
                test_topic(TopicId::new()),
                test_topic(TopicId::new()),
            ])
        });

        let service = TopicService::new(Arc::new(topic_repository), Arc::new(user_repository));

        let topics = service.list_topics().await.unwrap();
        assert_eq!(topics.len(), 2);
    }
}
