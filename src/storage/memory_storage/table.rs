//! 内存表
//!
//! 每张表是一个按插入顺序保存的 `Vec`，由异步读写锁保护，
//! 另带一个单调递增的 ID 序列（初始值为数据集中最大 ID + 1）。

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use crate::errors::{CampusError, Result};

/// 可以存入内存表的记录
pub(crate) trait Record: Clone + Send + Sync {
    fn id(&self) -> i64;
}

pub(crate) struct Table<T> {
    name: &'static str,
    rows: RwLock<Vec<T>>,
    next_id: AtomicI64,
}

impl<T: Record> Table<T> {
    pub fn new(name: &'static str, rows: Vec<T>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            if !seen.insert(row.id()) {
                return Err(CampusError::fixture_load(format!(
                    "duplicate id {} in {name}",
                    row.id()
                )));
            }
        }

        let next_id = rows.iter().map(Record::id).max().unwrap_or(0) + 1;
        Ok(Self {
            name,
            rows: RwLock::new(rows),
            next_id: AtomicI64::new(next_id),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// 追加一条新记录，`build` 接收新分配的 ID
    pub async fn insert_with(&self, build: impl FnOnce(i64) -> T) -> T {
        let mut rows = self.rows.write().await;
        let row = build(self.allocate_id());
        rows.push(row.clone());
        row
    }

    /// 在同一把写锁内检查冲突后追加，存在冲突时返回冲突的那条记录
    pub async fn insert_unless(
        &self,
        conflict: impl Fn(&T) -> bool,
        build: impl FnOnce(i64) -> T,
    ) -> std::result::Result<T, T> {
        let mut rows = self.rows.write().await;
        if let Some(existing) = rows.iter().find(|r| conflict(r)) {
            return Err(existing.clone());
        }
        let row = build(self.allocate_id());
        rows.push(row.clone());
        Ok(row)
    }

    pub async fn get(&self, id: i64) -> Option<T> {
        self.rows.read().await.iter().find(|r| r.id() == id).cloned()
    }

    pub async fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.read().await.iter().find(|r| pred(r)).cloned()
    }

    pub async fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .read()
            .await
            .iter()
            .filter(|r| pred(r))
            .cloned()
            .collect()
    }

    pub async fn count(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.rows.read().await.iter().filter(|r| pred(r)).count()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// 原地修改，ID 不存在时返回 None
    pub async fn update(&self, id: i64, apply: impl FnOnce(&mut T)) -> Option<T> {
        let mut rows = self.rows.write().await;
        let row = rows.iter_mut().find(|r| r.id() == id)?;
        apply(row);
        Some(row.clone())
    }

    /// 在同一把写锁内检查其他记录是否冲突后再修改
    ///
    /// 冲突检查跳过 `id` 本身；存在冲突时返回冲突记录，ID 不存在时返回 `Ok(None)`。
    pub async fn update_unless(
        &self,
        id: i64,
        conflict: impl Fn(&T) -> bool,
        apply: impl FnOnce(&mut T),
    ) -> std::result::Result<Option<T>, T> {
        let mut rows = self.rows.write().await;
        if let Some(existing) = rows.iter().find(|r| r.id() != id && conflict(r)) {
            return Err(existing.clone());
        }
        let Some(row) = rows.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        apply(row);
        Ok(Some(row.clone()))
    }

    /// 修改所有满足条件的记录，返回修改条数
    pub async fn update_where(
        &self,
        pred: impl Fn(&T) -> bool,
        mut apply: impl FnMut(&mut T),
    ) -> usize {
        let mut rows = self.rows.write().await;
        let mut changed = 0;
        for row in rows.iter_mut().filter(|r| pred(r)) {
            apply(row);
            changed += 1;
        }
        changed
    }

    /// 在同一把写锁内更新已有记录或追加新记录，返回 (记录, 是否新建)
    pub async fn upsert(
        &self,
        pred: impl Fn(&T) -> bool,
        apply: impl FnOnce(&mut T),
        build: impl FnOnce(i64) -> T,
    ) -> (T, bool) {
        let mut rows = self.rows.write().await;
        if let Some(row) = rows.iter_mut().find(|r| pred(r)) {
            apply(row);
            return (row.clone(), false);
        }
        let row = build(self.allocate_id());
        rows.push(row.clone());
        (row, true)
    }

    /// 按 ID 删除，只删除匹配的那一条
    pub async fn remove(&self, id: i64) -> bool {
        let mut rows = self.rows.write().await;
        match rows.iter().position(|r| r.id() == id) {
            Some(index) => {
                rows.remove(index);
                true
            }
            None => false,
        }
    }

    /// 删除所有满足条件的记录，返回删除条数
    pub async fn remove_where(&self, pred: impl Fn(&T) -> bool) -> usize {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| !pred(r));
        before - rows.len()
    }
}
