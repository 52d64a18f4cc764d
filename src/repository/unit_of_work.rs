use std::cell::{Cell, RefCell, RefMut};

use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::sqlite::SqliteConnection;

use crate::db::DbConnection;
use crate::repository::{RepositoryError, RepositoryResult, UnitOfWork};

type Transactions = AnsiTransactionManager;

/// A pooled connection shared by every store of one request.
///
/// In transactional mode all writes stay invisible to other connections
/// until [`UnitOfWork::commit`]. Dropping an uncommitted unit rolls it back.
pub struct DieselUnitOfWork {
    conn: RefCell<DbConnection>,
    transactional: bool,
    open: Cell<bool>,
}

impl DieselUnitOfWork {
    /// Starts a transaction on `conn`.
    pub fn begin(mut conn: DbConnection) -> RepositoryResult<Self> {
        let raw: &mut SqliteConnection = &mut conn;
        <Transactions as TransactionManager<SqliteConnection>>::begin_transaction(raw)?;
        log::debug!("unit of work started");
        Ok(Self {
            conn: RefCell::new(conn),
            transactional: true,
            open: Cell::new(true),
        })
    }

    /// Wraps `conn` without a transaction; every statement commits on its own
    /// and `commit`/`rollback` are no-ops.
    pub fn autocommit(conn: DbConnection) -> Self {
        Self {
            conn: RefCell::new(conn),
            transactional: false,
            open: Cell::new(false),
        }
    }

    /// Borrow the connection for a single store operation.
    ///
    /// Store calls never nest, so a second borrow is a bug.
    pub(crate) fn conn(&self) -> RefMut<'_, DbConnection> {
        self.conn.borrow_mut()
    }

    /// Whether a transaction is still pending.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    fn finish(&self, commit: bool) -> RepositoryResult<()> {
        if !self.open.replace(false) {
            return Ok(());
        }
        let mut conn = self.conn.borrow_mut();
        let raw: &mut SqliteConnection = &mut conn;
        if commit {
            <Transactions as TransactionManager<SqliteConnection>>::commit_transaction(raw)?;
            log::debug!("unit of work committed");
        } else {
            <Transactions as TransactionManager<SqliteConnection>>::rollback_transaction(raw)?;
            log::debug!("unit of work rolled back");
        }
        Ok(())
    }

    /// Fails once the transaction has been committed or rolled back, so late
    /// writes cannot silently autocommit.
    pub(crate) fn ensure_writable(&self) -> RepositoryResult<()> {
        if self.transactional && !self.open.get() {
            return Err(RepositoryError::UnitOfWorkFinished);
        }
        Ok(())
    }
}

impl UnitOfWork for DieselUnitOfWork {
    fn commit(&self) -> RepositoryResult<()> {
        self.finish(true)
    }

    fn rollback(&self) -> RepositoryResult<()> {
        self.finish(false)
    }
}

impl Drop for DieselUnitOfWork {
    fn drop(&mut self) {
        if self.open.get() {
            if let Err(e) = self.finish(false) {
                log::error!("Failed to roll back unit of work: {e}");
            }
        }
    }
}
