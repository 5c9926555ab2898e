//! SQLite-backed read access to the analytics tables.
//!
//! The database is owned and populated by an external producer (the Prisma
//! pipeline); this service only reads it. Production opens the file
//! read-only and never creates schema. Instants are ms-epoch values, but
//! the producer's column affinity can surface them as datetime text, so
//! every temporal ORDER BY goes through CAST(... AS INTEGER) -- sorting
//! the stored text would be lexicographic and give wrong "latest" rows.
//! Used by: handlers, state, console.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OpenFlags};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct KpiSnapshot {
    pub captured_at: i64,
    pub total_users: i64,
    pub sessions: i64,
    pub conversion_pct: f64,
    pub revenue_cents: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrafficDaily {
    pub date: i64,
    pub visits: i64,
    pub sessions: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueDaily {
    pub date: i64,
    pub value_cents: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignupByChannel {
    pub year: i64,
    pub month: i64,
    pub channel: String,
    pub signups: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceShare {
    pub snapshot_date: i64,
    pub device: String,
    pub share_pct: f64,
}

pub struct AnalyticsStore {
    conn: Mutex<Connection>,
}

impl AnalyticsStore {
    /// Open the producer's database read-only. Fails if it doesn't exist;
    /// this service never bootstraps schema in production.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// In-memory store with the producer's schema, for test isolation.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(
            "CREATE TABLE KpiSnapshot (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                capturedAt INTEGER UNIQUE NOT NULL,
                totalUsers INTEGER NOT NULL,
                sessions INTEGER NOT NULL,
                conversionPct REAL NOT NULL,
                revenueCents INTEGER NOT NULL
            );
            CREATE TABLE TrafficDaily (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date INTEGER UNIQUE NOT NULL,
                visits INTEGER NOT NULL,
                sessions INTEGER NOT NULL
            );
            CREATE TABLE RevenueDaily (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date INTEGER UNIQUE NOT NULL,
                valueCents INTEGER NOT NULL
            );
            CREATE TABLE SignupByChannel (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                year INTEGER NOT NULL,
                month INTEGER NOT NULL,
                channel TEXT NOT NULL,
                signups INTEGER NOT NULL,
                UNIQUE (year, month, channel)
            );
            CREATE TABLE DeviceShare (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                snapshotDate INTEGER NOT NULL,
                device TEXT NOT NULL,
                sharePct REAL NOT NULL,
                UNIQUE (snapshotDate, device)
            );",
        )?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| Error::Internal(e.to_string()))
    }

    /// The single snapshot with maximal capturedAt, or None on an empty table.
    pub fn latest_kpi(&self) -> Result<Option<KpiSnapshot>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT capturedAt, totalUsers, sessions, conversionPct, revenueCents
             FROM KpiSnapshot
             ORDER BY CAST(capturedAt AS INTEGER) DESC
             LIMIT 1",
        )?;
        let mut rows = stmt.query_map([], |row| {
            Ok(KpiSnapshot {
                captured_at: row.get(0)?,
                total_users: row.get(1)?,
                sessions: row.get(2)?,
                conversion_pct: row.get(3)?,
                revenue_cents: row.get(4)?,
            })
        })?;
        rows.next().transpose().map_err(Error::from)
    }

    /// The `limit` most recent traffic rows, returned oldest-first.
    /// Equal dates fall back to insertion order (rowid).
    pub fn recent_traffic(&self, limit: u32) -> Result<Vec<TrafficDaily>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT date, visits, sessions FROM TrafficDaily
             ORDER BY CAST(date AS INTEGER) DESC, rowid DESC
             LIMIT ?1",
        )?;
        let mut rows = stmt
            .query_map([limit], |row| {
                Ok(TrafficDaily {
                    date: row.get(0)?,
                    visits: row.get(1)?,
                    sessions: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.reverse();
        Ok(rows)
    }

    /// The `limit` most recent revenue rows, returned oldest-first.
    pub fn recent_revenue(&self, limit: u32) -> Result<Vec<RevenueDaily>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT date, valueCents FROM RevenueDaily
             ORDER BY CAST(date AS INTEGER) DESC, rowid DESC
             LIMIT ?1",
        )?;
        let mut rows = stmt
            .query_map([limit], |row| {
                Ok(RevenueDaily { date: row.get(0)?, value_cents: row.get(1)? })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.reverse();
        Ok(rows)
    }

    /// All rows of the maximal (year, month) pair, channel ascending.
    /// Empty table yields an empty vec, not an error.
    pub fn latest_month_signups(&self) -> Result<Vec<SignupByChannel>> {
        let conn = self.conn()?;
        let latest: Option<(i64, i64)> = conn
            .query_row(
                "SELECT year, month FROM SignupByChannel
                 ORDER BY year DESC, month DESC
                 LIMIT 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        let Some((year, month)) = latest else {
            return Ok(Vec::new());
        };
        let mut stmt = conn.prepare(
            "SELECT year, month, channel, signups FROM SignupByChannel
             WHERE year = ?1 AND month = ?2
             ORDER BY channel ASC",
        )?;
        let rows = stmt
            .query_map([year, month], |row| {
                Ok(SignupByChannel {
                    year: row.get(0)?,
                    month: row.get(1)?,
                    channel: row.get(2)?,
                    signups: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// All rows sharing the maximal snapshotDate, device ascending.
    pub fn latest_device_share(&self) -> Result<Vec<DeviceShare>> {
        let conn = self.conn()?;
        let latest: Option<i64> = conn
            .query_row(
                "SELECT CAST(snapshotDate AS INTEGER) FROM DeviceShare
                 ORDER BY CAST(snapshotDate AS INTEGER) DESC
                 LIMIT 1",
                [],
                |row| row.get(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        let Some(snapshot_date) = latest else {
            return Ok(Vec::new());
        };
        let mut stmt = conn.prepare(
            "SELECT snapshotDate, device, sharePct FROM DeviceShare
             WHERE CAST(snapshotDate AS INTEGER) = ?1
             ORDER BY device ASC",
        )?;
        let rows = stmt
            .query_map([snapshot_date], |row| {
                Ok(DeviceShare {
                    snapshot_date: row.get(0)?,
                    device: row.get(1)?,
                    share_pct: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

// Test-only seeding. The production surface stays strictly read-only.
#[cfg(test)]
impl AnalyticsStore {
    pub fn insert_kpi(&self, snap: &KpiSnapshot) -> Result<()> {
        self.conn()?.execute(
            "INSERT INTO KpiSnapshot (capturedAt, totalUsers, sessions, conversionPct, revenueCents)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                snap.captured_at,
                snap.total_users,
                snap.sessions,
                snap.conversion_pct,
                snap.revenue_cents,
            ),
        )?;
        Ok(())
    }

    pub fn insert_traffic(&self, date: i64, visits: i64, sessions: i64) -> Result<()> {
        self.conn()?.execute(
            "INSERT INTO TrafficDaily (date, visits, sessions) VALUES (?1, ?2, ?3)",
            (date, visits, sessions),
        )?;
        Ok(())
    }

    pub fn insert_revenue(&self, date: i64, value_cents: i64) -> Result<()> {
        self.conn()?.execute(
            "INSERT INTO RevenueDaily (date, valueCents) VALUES (?1, ?2)",
            (date, value_cents),
        )?;
        Ok(())
    }

    pub fn insert_signup(&self, year: i64, month: i64, channel: &str, signups: i64) -> Result<()> {
        self.conn()?.execute(
            "INSERT INTO SignupByChannel (year, month, channel, signups) VALUES (?1, ?2, ?3, ?4)",
            (year, month, channel, signups),
        )?;
        Ok(())
    }

    pub fn insert_device_share(&self, snapshot_date: i64, device: &str, share_pct: f64) -> Result<()> {
        self.conn()?.execute(
            "INSERT INTO DeviceShare (snapshotDate, device, sharePct) VALUES (?1, ?2, ?3)",
            (snapshot_date, device, share_pct),
        )?;
        Ok(())
    }
}
