//! Instance
//!
//! The [`Instance`] ties the credential store, sync store, auth resolver and
//! identity locks together and implements the account flows exposed over
//! HTTP. It is cheap to clone; all clones share state.

use std::path::PathBuf;
use std::sync::Arc;

use zeroize::Zeroizing;

use crate::Result;
use crate::auth::{AuthResolver, Principal};
use crate::clock::{Clock, SystemClock};
use crate::constants::{DEFAULT_DATA_DIR, DEFAULT_USERS_DIR};
use crate::identity::IdentityKey;
use crate::locks::IdentityLocks;
use crate::sync::{SyncData, SyncStore};
use crate::user::{
    CredentialStore, HashCost, PasswordHashing, User, UserError, UserRecord, generate_token,
    validation::validate_registration, verify_password,
};

pub mod errors;

pub use errors::InstanceError;

/// Startup configuration for an [`Instance`].
#[derive(Clone)]
pub struct InstanceConfig {
    /// Directory holding one credential record per identity
    pub users_dir: PathBuf,
    /// Directory holding one storage directory per identity
    pub data_dir: PathBuf,
    /// Static admin credential
    pub admin_token: Zeroizing<String>,
    /// Argon2id cost for new password hashes
    pub hash_cost: HashCost,
    /// Time source for record timestamps
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for InstanceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceConfig")
            .field("users_dir", &self.users_dir)
            .field("data_dir", &self.data_dir)
            .field("admin_token", &"<redacted>")
            .field("hash_cost", &self.hash_cost)
            .field("clock", &self.clock)
            .finish()
    }
}

impl InstanceConfig {
    pub fn new(admin_token: impl Into<String>) -> Self {
        Self {
            users_dir: PathBuf::from(DEFAULT_USERS_DIR),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            admin_token: Zeroizing::new(admin_token.into()),
            hash_cost: HashCost::default(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_users_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.users_dir = dir.into();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_hash_cost(mut self, cost: HashCost) -> Self {
        self.hash_cost = cost;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

#[derive(Debug)]
struct Inner {
    credentials: CredentialStore,
    sync: SyncStore,
    resolver: AuthResolver,
    locks: IdentityLocks,
    hashing: PasswordHashing,
    clock: Arc<dyn Clock>,
    /// Verified against when the email is unknown, so that both login
    /// failures cost one hash verification.
    dummy_hash: String,
}

#[derive(Clone, Debug)]
pub struct Instance {
    inner: Arc<Inner>,
}

impl Instance {
    /// Open an instance: create the storage directories and index every
    /// persisted token.
    ///
    /// Fails if any credential record cannot be read, rather than serving
    /// with that user's token missing from the index.
    pub async fn open(config: InstanceConfig) -> Result<Self> {
        create_private_dir(&config.users_dir).await?;
        create_private_dir(&config.data_dir).await?;

        let credentials = CredentialStore::new(&config.users_dir);
        let resolver = AuthResolver::new(config.admin_token.as_str(), credentials.clone())?;
        resolver.rebuild_index().await?;

        let hashing = PasswordHashing::new(config.hash_cost)?;
        let dummy_hash = {
            let hashing = hashing.clone();
            let password = generate_token()?;
            tokio::task::spawn_blocking(move || hashing.hash_password(password))
                .await
                .map_err(InstanceError::from)??
        };

        tracing::info!(
            users_dir = %config.users_dir.display(),
            data_dir = %config.data_dir.display(),
            "Instance opened"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                credentials,
                sync: SyncStore::new(&config.data_dir),
                resolver,
                locks: IdentityLocks::new(),
                hashing,
                clock: config.clock,
                dummy_hash,
            }),
        })
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.inner.credentials
    }

    pub fn sync_store(&self) -> &SyncStore {
        &self.inner.sync
    }

    pub fn resolver(&self) -> &AuthResolver {
        &self.inner.resolver
    }

    /// Create an account and its first session.
    ///
    /// Input is validated and the duplicate check done before anything is
    /// written. The credential record is then saved before the storage
    /// directory is created; if the second step fails the record remains.
    pub async fn register(&self, email: &str, password: &str) -> Result<User> {
        validate_registration(email, password)?;
        let identity = IdentityKey::from_email(email);
        let _guard = self.inner.locks.lock(&identity).await;

        if self.inner.credentials.exists(&identity).await? {
            return Err(UserError::UserAlreadyExists.into());
        }

        let password_hash = self.hash_password(password).await?;
        let record = UserRecord {
            email: email.to_string(),
            password_hash,
            token: generate_token()?,
            created_at: self.inner.clock.now_rfc3339(),
        };

        self.inner.credentials.save(&record).await?;
        self.inner
            .resolver
            .token_issued(None, &record.token, &identity);
        self.inner.sync.ensure_user_dir(&identity).await?;

        tracing::info!(identity = %identity, "Registered user");
        Ok(record.into())
    }

    /// Verify a password and issue a new token, revoking the previous one.
    ///
    /// Unknown emails and wrong passwords both fail with
    /// `UserError::InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let identity = IdentityKey::from_email(email);
        let _guard = self.inner.locks.lock(&identity).await;

        let mut record = match self.inner.credentials.load(&identity).await {
            Ok(record) => record,
            Err(e) if e.is_not_found() => {
                let _ = self
                    .verify_password(password, self.inner.dummy_hash.clone())
                    .await;
                tracing::debug!(identity = %identity, "login for unknown identity");
                return Err(UserError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        if let Err(e) = self
            .verify_password(password, record.password_hash.clone())
            .await
        {
            if e.is_authentication_error() {
                tracing::debug!(identity = %identity, "login with wrong password");
            }
            return Err(e);
        }

        let previous = std::mem::replace(&mut record.token, generate_token()?);
        self.inner.credentials.save(&record).await?;
        self.inner
            .resolver
            .token_issued(Some(&previous), &record.token, &identity);

        tracing::info!(identity = %identity, "User logged in");
        Ok(record.into())
    }

    /// Resolve a raw Authorization header value.
    pub async fn authenticate(&self, header: Option<&str>) -> Result<Principal> {
        self.inner.resolver.resolve(header).await
    }

    /// Read the principal's sync document (empty default if never pushed).
    pub async fn pull(&self, principal: &Principal) -> Result<SyncData> {
        self.inner.sync.get(&principal.partition()).await
    }

    /// Replace the principal's sync document.
    pub async fn push(&self, principal: &Principal, data: &SyncData) -> Result<()> {
        let partition = principal.partition();
        let _guard = self.inner.locks.lock(&partition).await;
        self.inner.sync.put(&partition, data).await
    }

    async fn hash_password(&self, password: &str) -> Result<String> {
        let hashing = self.inner.hashing.clone();
        let password = Zeroizing::new(password.to_string());
        tokio::task::spawn_blocking(move || hashing.hash_password(password.as_str()))
            .await
            .map_err(InstanceError::from)?
    }

    async fn verify_password(&self, password: &str, password_hash: String) -> Result<()> {
        let password = Zeroizing::new(password.to_string());
        tokio::task::spawn_blocking(move || verify_password(password.as_str(), password_hash))
            .await
            .map_err(InstanceError::from)?
    }
}

async fn create_private_dir(dir: &std::path::Path) -> Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o700)).await?;
    }
    Ok(())
}
