//! Database service using RocksDB.
//!
//! RocksDB provides excellent crash safety through its LSM-tree architecture
//! and write-ahead log (WAL). All writes are atomic and durable. Records are
//! stored as JSON documents keyed by UUID.
//!
//! # Data Organization
//!
//! Uses column families to separate data types:
//! - `users`: User records (key: UUID)
//! - `username_index`: username → user UUID (uniqueness + lookup)
//! - `email_index`: email → user UUID (uniqueness + lookup)
//! - `videos`: Video records (key: UUID)
//! - `owner_index`: "owner_uuid:video_uuid" → video UUID (list-by-owner scans)

use crate::config::StorageConfig;
use crate::error::{AppError, Result};
use crate::models::{User, Video};
use chrono::{DateTime, Utc};
use rocksdb::{ColumnFamilyDescriptor, DBWithThreadMode, MultiThreaded, Options, WriteBatch};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

type DB = DBWithThreadMode<MultiThreaded>;

/// Column family names
const CF_USERS: &str = "users";
const CF_USERNAME_INDEX: &str = "username_index";
const CF_EMAIL_INDEX: &str = "email_index";
const CF_VIDEOS: &str = "videos";
const CF_OWNER_INDEX: &str = "owner_index";

/// Database service for managing user and video documents
///
/// Uses RocksDB for high performance and crash safety.
#[derive(Clone)]
pub struct DatabaseService {
    db: Arc<DB>,
    #[allow(dead_code)]
    db_path: PathBuf,
}

impl std::fmt::Debug for DatabaseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseService")
            .field("path", &self.db_path)
            .finish()
    }
}

impl DatabaseService {
    /// Create a new database service
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let db_path = config.data_dir.join("rocksdb");

        // Ensure directory exists
        std::fs::create_dir_all(&db_path)?;

        // Configure RocksDB options
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        // Performance tuning
        opts.set_max_open_files(256);
        opts.set_keep_log_file_num(3);
        opts.set_max_total_wal_size(64 * 1024 * 1024); // 64MB
        opts.set_write_buffer_size(32 * 1024 * 1024); // 32MB
        opts.set_max_write_buffer_number(3);

        // Define column families
        let cf_names = [
            CF_USERS,
            CF_USERNAME_INDEX,
            CF_EMAIL_INDEX,
            CF_VIDEOS,
            CF_OWNER_INDEX,
        ];
        let cf_descriptors: Vec<_> = cf_names
            .iter()
            .map(|name| {
                let mut cf_opts = Options::default();
                cf_opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
                ColumnFamilyDescriptor::new(*name, cf_opts)
            })
            .collect();

        // Open database with column families
        let db = DB::open_cf_descriptors(&opts, &db_path, cf_descriptors)?;

        info!(path = %db_path.display(), "Database initialized (RocksDB)");

        Ok(Self {
            db: Arc::new(db),
            db_path,
        })
    }

    fn cf_users(&self) -> Arc<rocksdb::BoundColumnFamily<'_>> {
        self.db.cf_handle(CF_USERS).expect("CF users must exist")
    }

    fn cf_username_index(&self) -> Arc<rocksdb::BoundColumnFamily<'_>> {
        self.db
            .cf_handle(CF_USERNAME_INDEX)
            .expect("CF username_index must exist")
    }

    fn cf_email_index(&self) -> Arc<rocksdb::BoundColumnFamily<'_>> {
        self.db
            .cf_handle(CF_EMAIL_INDEX)
            .expect("CF email_index must exist")
    }

    fn cf_videos(&self) -> Arc<rocksdb::BoundColumnFamily<'_>> {
        self.db.cf_handle(CF_VIDEOS).expect("CF videos must exist")
    }

    fn cf_owner_index(&self) -> Arc<rocksdb::BoundColumnFamily<'_>> {
        self.db
            .cf_handle(CF_OWNER_INDEX)
            .expect("CF owner_index must exist")
    }

    // =========================================================================
    // User operations
    // =========================================================================

    /// Insert a new user record
    pub fn insert_user(&self, user: &User) -> Result<()> {
        let record = UserRecord::from(user);
        let data = serde_json::to_vec(&record)?;

        // Atomic batch write: user record + both uniqueness indexes
        let mut batch = WriteBatch::default();
        batch.put_cf(&self.cf_users(), user.id.to_string().as_bytes(), &data);
        batch.put_cf(
            &self.cf_username_index(),
            user.username.as_bytes(),
            user.id.to_string().as_bytes(),
        );
        batch.put_cf(
            &self.cf_email_index(),
            user.email.as_bytes(),
            user.id.to_string().as_bytes(),
        );

        self.db.write(batch)?;

        debug!(id = %user.id, username = %user.username, "Inserted user record");
        Ok(())
    }

    /// Get a user record by ID
    pub fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let key = id.to_string();
        match self.db.get_cf(&self.cf_users(), key.as_bytes())? {
            Some(data) => {
                let record: UserRecord = serde_json::from_slice(&data)?;
                Ok(Some(record.into_user()?))
            }
            None => Ok(None),
        }
    }

    /// Find a user by username (index lookup)
    pub fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.find_user_indexed(&self.cf_username_index(), username)
    }

    /// Find a user by email (index lookup)
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_user_indexed(&self.cf_email_index(), email)
    }

    fn find_user_indexed(
        &self,
        cf: &Arc<rocksdb::BoundColumnFamily<'_>>,
        key: &str,
    ) -> Result<Option<User>> {
        match self.db.get_cf(cf, key.as_bytes())? {
            Some(id_bytes) => {
                let id_str = String::from_utf8_lossy(&id_bytes);
                let id = Uuid::parse_str(&id_str)
                    .map_err(|e| AppError::internal(format!("Corrupt index entry: {}", e)))?;
                self.get_user(id)
            }
            None => Ok(None),
        }
    }

    /// Get total user count
    pub fn user_count(&self) -> Result<u64> {
        self.count_cf(&self.cf_users())
    }

    // =========================================================================
    // Video operations
    // =========================================================================

    /// Insert a new video record
    pub fn insert_video(&self, video: &Video) -> Result<()> {
        let record = VideoRecord::from(video);
        let data = serde_json::to_vec(&record)?;

        // Atomic batch write: video record + owner index
        let mut batch = WriteBatch::default();
        batch.put_cf(&self.cf_videos(), video.id.to_string().as_bytes(), &data);
        batch.put_cf(
            &self.cf_owner_index(),
            owner_index_key(video.owner, video.id).as_bytes(),
            video.id.to_string().as_bytes(),
        );

        self.db.write(batch)?;

        debug!(id = %video.id, owner = %video.owner, "Inserted video record");
        Ok(())
    }

    /// Get a video record by ID
    pub fn get_video(&self, id: Uuid) -> Result<Option<Video>> {
        let key = id.to_string();
        match self.db.get_cf(&self.cf_videos(), key.as_bytes())? {
            Some(data) => {
                let record: VideoRecord = serde_json::from_slice(&data)?;
                Ok(Some(record.into_video()?))
            }
            None => Ok(None),
        }
    }

    /// Save a modified video record
    ///
    /// The owner of a video never changes, so the owner index is untouched.
    pub fn update_video(&self, video: &Video) -> Result<()> {
        let record = VideoRecord::from(video);
        let data = serde_json::to_vec(&record)?;

        self.db
            .put_cf(&self.cf_videos(), video.id.to_string().as_bytes(), data)?;

        debug!(id = %video.id, "Updated video record");
        Ok(())
    }

    /// Delete a video record by ID
    pub fn delete_video(&self, id: Uuid) -> Result<bool> {
        // First get the video to find its owner index entry
        let video = match self.get_video(id)? {
            Some(v) => v,
            None => return Ok(false),
        };

        // Atomic delete of both record and owner index
        let mut batch = WriteBatch::default();
        batch.delete_cf(&self.cf_videos(), id.to_string().as_bytes());
        batch.delete_cf(
            &self.cf_owner_index(),
            owner_index_key(video.owner, id).as_bytes(),
        );

        self.db.write(batch)?;

        debug!(id = %id, "Deleted video record");
        Ok(true)
    }

    /// List all videos owned by a user, oldest first
    pub fn list_videos_by_owner(&self, owner: Uuid) -> Result<Vec<Video>> {
        let prefix = format!("{}:", owner);
        let mut videos = Vec::new();

        // Scan the owner index from the prefix; keys sort lexically so the
        // scan stops at the first key outside the owner's range
        let iter = self.db.iterator_cf(
            &self.cf_owner_index(),
            rocksdb::IteratorMode::From(prefix.as_bytes(), rocksdb::Direction::Forward),
        );

        for item in iter {
            let (key, value) = item?;

            let key_str = String::from_utf8_lossy(&key);
            if !key_str.starts_with(&prefix) {
                break;
            }

            let id_str = String::from_utf8_lossy(&value);
            let id = Uuid::parse_str(&id_str)
                .map_err(|e| AppError::internal(format!("Corrupt index entry: {}", e)))?;

            if let Some(video) = self.get_video(id)? {
                videos.push(video);
            }
        }

        videos.sort_by_key(|v| v.created_at);

        Ok(videos)
    }

    /// Get total video count
    pub fn video_count(&self) -> Result<u64> {
        self.count_cf(&self.cf_videos())
    }

    fn count_cf(&self, cf: &Arc<rocksdb::BoundColumnFamily<'_>>) -> Result<u64> {
        let mut count = 0u64;
        let iter = self.db.iterator_cf(cf, rocksdb::IteratorMode::Start);

        for item in iter {
            if item.is_ok() {
                count += 1;
            }
        }

        Ok(count)
    }
}

/// Owner index key: "owner_uuid:video_uuid"
fn owner_index_key(owner: Uuid, video_id: Uuid) -> String {
    format!("{}:{}", owner, video_id)
}

// =============================================================================
// Serialization structs
// =============================================================================

#[derive(Serialize, Deserialize)]
struct UserRecord {
    id: String,
    username: String,
    email: String,
    full_name: String,
    password_hash: String,
    avatar: String,
    cover_image: Option<String>,
    created_at: String,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            password_hash: user.password_hash.clone(),
            avatar: user.avatar.clone(),
            cover_image: user.cover_image.clone(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

impl UserRecord {
    fn into_user(self) -> Result<User> {
        Ok(User {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| AppError::internal(format!("Corrupt user record: {}", e)))?,
            username: self.username,
            email: self.email,
            full_name: self.full_name,
            password_hash: self.password_hash,
            avatar: self.avatar,
            cover_image: self.cover_image,
            created_at: parse_date(&self.created_at)?,
        })
    }
}

#[derive(Serialize, Deserialize)]
struct VideoRecord {
    id: String,
    title: String,
    description: String,
    video_file: String,
    thumbnail: Option<String>,
    duration: f64,
    owner: String,
    is_published: bool,
    created_at: String,
}

impl From<&Video> for VideoRecord {
    fn from(video: &Video) -> Self {
        Self {
            id: video.id.to_string(),
            title: video.title.clone(),
            description: video.description.clone(),
            video_file: video.video_file.clone(),
            thumbnail: video.thumbnail.clone(),
            duration: video.duration,
            owner: video.owner.to_string(),
            is_published: video.is_published,
            created_at: video.created_at.to_rfc3339(),
        }
    }
}

impl VideoRecord {
    fn into_video(self) -> Result<Video> {
        Ok(Video {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| AppError::internal(format!("Corrupt video record: {}", e)))?,
            title: self.title,
            description: self.description,
            video_file: self.video_file,
            thumbnail: self.thumbnail,
            duration: self.duration,
            owner: Uuid::parse_str(&self.owner)
                .map_err(|e| AppError::internal(format!("Corrupt video record: {}", e)))?,
            is_published: self.is_published,
            created_at: parse_date(&self.created_at)?,
        })
    }
}

fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)
        .map_err(|e| AppError::internal(format!("Invalid date: {}", e)))?
        .with_timezone(&Utc))
}
