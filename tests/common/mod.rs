//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;

use rei_bot::application::errors::{BotError, PlatformError, StorageError};
use rei_bot::application::messaging::{
    CommandContext, InvocationContext, MessageDispatcher, PrefixResolver,
};
use rei_bot::application::permissions::RolePermissionGate;
use rei_bot::domain::entities::{
    Command, CommandRegistry, Guild, Member, Message, Permission, Reply, User,
};
use rei_bot::domain::traits::{
    AuditSink, CommandHandler, ErrorSink, Platform, PrefixStore,
};
use rei_bot::infrastructure::database::StaticPrefixStore;

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("rei_bot=debug")
            .try_init();
    });
}

pub const GUILD_ID: &str = "900";
pub const CHANNEL_ID: &str = "901";
pub const BOT_ID: &str = "1";
pub const ACTOR_ID: &str = "10";

pub fn guild() -> Guild {
    Guild::new(GUILD_ID, "NERV HQ")
}

pub fn bot_user() -> User {
    User::new(BOT_ID, "rei-bot").bot()
}

pub fn actor() -> Member {
    Member::new(User::new(ACTOR_ID, "misato")).with_permissions(vec![Permission::BanMembers])
}

/// A message typed by the default actor
pub fn message(text: &str) -> Message {
    let actor = actor();
    Message::new(guild(), CHANNEL_ID, actor.user.clone(), text).with_member(actor)
}

/// Every platform call the code under test made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Reply(Reply),
    Direct { user_id: String, reply: Reply },
    FetchMember(String),
    FetchUser(String),
    BanMember { user_id: String, reason: String },
    BanUser { user_id: String, reason: String },
    Activity(String),
}

/// Platform double that records calls and serves a fixed roster
pub struct MockPlatform {
    members: HashMap<String, Member>,
    users: HashMap<String, User>,
    fail_direct: bool,
    fail_ban: bool,
    calls: Mutex<Vec<Call>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            members: HashMap::new(),
            users: HashMap::new(),
            fail_direct: false,
            fail_ban: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.users.insert(member.user.id.clone(), member.user.clone());
        self.members.insert(member.user.id.clone(), member);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    pub fn failing_direct(mut self) -> Self {
        self.fail_direct = true;
        self
    }

    pub fn failing_ban(mut self) -> Self {
        self.fail_ban = true;
        self
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn replies(&self) -> Vec<Reply> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Reply(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn last_reply_text(&self) -> Option<String> {
        self.replies().last().map(Reply::render)
    }

    pub fn bans(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::BanMember { .. } | Call::BanUser { .. }))
            .collect()
    }

    pub fn directs(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Direct { .. }))
            .count()
    }
}

#[async_trait]
impl Platform for MockPlatform {
    fn bot_user(&self) -> User {
        bot_user()
    }

    async fn reply(&self, _channel_id: &str, reply: Reply) -> Result<(), PlatformError> {
        self.push(Call::Reply(reply));
        Ok(())
    }

    async fn send_direct(&self, user_id: &str, reply: Reply) -> Result<(), PlatformError> {
        self.push(Call::Direct {
            user_id: user_id.to_string(),
            reply,
        });
        if self.fail_direct {
            return Err(PlatformError::DirectMessagesClosed);
        }
        Ok(())
    }

    async fn fetch_member(&self, guild_id: &str, user_id: &str) -> Result<Member, PlatformError> {
        self.push(Call::FetchMember(user_id.to_string()));
        if guild_id != GUILD_ID {
            return Err(PlatformError::NotFound("guild".into()));
        }
        self.members
            .get(user_id)
            .cloned()
            .ok_or_else(|| PlatformError::NotFound("member".into()))
    }

    async fn fetch_user(&self, user_id: &str) -> Result<User, PlatformError> {
        self.push(Call::FetchUser(user_id.to_string()));
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| PlatformError::NotFound("user".into()))
    }

    async fn ban_member(&self, _guild_id: &str, member: &User, reason: &str) -> Result<(), PlatformError> {
        self.push(Call::BanMember {
            user_id: member.id.clone(),
            reason: reason.to_string(),
        });
        if self.fail_ban {
            return Err(PlatformError::Network("503 Service Unavailable".into()));
        }
        Ok(())
    }

    async fn ban_user(&self, _guild_id: &str, user_id: &str, reason: &str) -> Result<(), PlatformError> {
        self.push(Call::BanUser {
            user_id: user_id.to_string(),
            reason: reason.to_string(),
        });
        if self.fail_ban {
            return Err(PlatformError::Network("503 Service Unavailable".into()));
        }
        Ok(())
    }

    async fn set_activity(&self, status: &str) -> Result<(), PlatformError> {
        self.push(Call::Activity(status.to_string()));
        Ok(())
    }
}

/// Audit sink that keeps what it was given
#[derive(Default)]
pub struct RecordingAudit {
    pub records: Mutex<Vec<(String, Option<String>, String)>>,
    pub fail: bool,
}

impl RecordingAudit {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<(String, Option<String>, String)> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditSink for RecordingAudit {
    async fn record(
        &self,
        _ctx: &InvocationContext,
        command: &str,
        target: Option<&User>,
        reason: &str,
    ) -> Result<(), BotError> {
        self.records.lock().unwrap().push((
            command.to_string(),
            target.map(|u| u.id.clone()),
            reason.to_string(),
        ));
        if self.fail {
            return Err(BotError::Storage(StorageError::Serialization("disk full".into())));
        }
        Ok(())
    }
}

/// Error sink that counts faults
#[derive(Default)]
pub struct RecordingErrors {
    pub errors: Mutex<Vec<String>>,
}

impl RecordingErrors {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

#[async_trait]
impl ErrorSink for RecordingErrors {
    async fn handle(&self, error: &BotError, _ctx: &CommandContext) {
        self.errors.lock().unwrap().push(error.to_string());
    }
}

/// Prefix store that counts lookups
pub struct CountingPrefixStore {
    inner: StaticPrefixStore,
    pub lookups: AtomicUsize,
    fail: bool,
}

impl CountingPrefixStore {
    pub fn new(prefixes: &[(&str, &str)]) -> Self {
        Self {
            inner: StaticPrefixStore::new(
                prefixes
                    .iter()
                    .map(|(g, p)| (g.to_string(), p.to_string()))
                    .collect(),
            ),
            lookups: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(&[])
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PrefixStore for CountingPrefixStore {
    async fn prefix(&self, guild_id: &str) -> Result<Option<String>, StorageError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StorageError::Poisoned);
        }
        self.inner.prefix(guild_id).await
    }

    async fn set_prefix(&self, guild_id: &str, prefix: &str) -> Result<(), StorageError> {
        self.inner.set_prefix(guild_id, prefix).await
    }
}

/// What a test handler should do when run
#[derive(Clone, Copy)]
pub enum Behaviour {
    Succeed,
    Fail,
    Panic,
}

/// Command handler that counts invocations
pub struct CountingHandler {
    pub runs: AtomicUsize,
    pub seen_args: Mutex<Vec<Vec<String>>>,
    behaviour: Behaviour,
}

impl CountingHandler {
    pub fn new(behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            runs: AtomicUsize::new(0),
            seen_args: Mutex::new(Vec::new()),
            behaviour,
        })
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommandHandler for CountingHandler {
    async fn execute(
        &self,
        _ctx: &CommandContext,
        args: &[String],
        _registry: &CommandRegistry,
    ) -> Result<(), BotError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        self.seen_args.lock().unwrap().push(args.to_vec());
        match self.behaviour {
            Behaviour::Succeed => Ok(()),
            Behaviour::Fail => Err(BotError::Internal("boom".into())),
            Behaviour::Panic => panic!("handler exploded"),
        }
    }
}

/// Everything a dispatch test needs to inspect afterwards
pub struct Harness {
    pub platform: Arc<MockPlatform>,
    pub prefixes: Arc<CountingPrefixStore>,
    pub audit: Arc<RecordingAudit>,
    pub errors: Arc<RecordingErrors>,
    pub dispatcher: Arc<MessageDispatcher>,
}

pub fn harness(
    registry: CommandRegistry,
    platform: MockPlatform,
    prefixes: CountingPrefixStore,
    audit: RecordingAudit,
) -> Harness {
    ensure_init();

    let platform = Arc::new(platform);
    let prefixes = Arc::new(prefixes);
    let audit = Arc::new(audit);
    let errors = Arc::new(RecordingErrors::default());

    let dispatcher = Arc::new(MessageDispatcher::new(
        Arc::new(registry),
        platform.clone(),
        PrefixResolver::new(prefixes.clone(), "!"),
        Arc::new(RolePermissionGate::new()),
        audit.clone(),
        errors.clone(),
    ));

    Harness {
        platform,
        prefixes,
        audit,
        errors,
        dispatcher,
    }
}

pub fn registry_with(commands: Vec<Command>) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for command in commands {
        registry.register(command);
    }
    registry
}
