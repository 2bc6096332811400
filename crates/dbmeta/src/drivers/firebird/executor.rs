//! Firebird script executor implementation.
//!
//! `rsfbclient` connections run in autocommit mode until `begin_transaction`;
//! from then on `execute` uses the explicit transaction until it is committed
//! or rolled back.

use rsfbclient::Execute;
use rsfbclient_core::FirebirdClient;

use super::FbDatabase;
use crate::core::traits::ScriptExecutor;
use crate::error::Result;

impl<C: FirebirdClient> ScriptExecutor for FbDatabase<C> {
    fn begin_transaction(&mut self) -> Result<()> {
        self.conn.begin_transaction()?;
        Ok(())
    }

    fn execute_batch(&mut self, sql: &str) -> Result<()> {
        self.conn.execute(sql, ())?;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.conn.commit()?;
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.conn.rollback()?;
        Ok(())
    }
}
