use crate::{Confirmed, DeleteError, WipeAllData};

#[allow(async_fn_in_trait)]
pub trait DataService {
    async fn wipe_all_data(&self, action: Confirmed<WipeAllData>) -> Result<(), DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait DataRepository {
    /// Remove all routines, calendar assignments and workout sessions.
    async fn clear_all(&self) -> Result<(), DeleteError>;
}
