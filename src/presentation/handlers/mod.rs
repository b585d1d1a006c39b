mod execute_sql;
mod health;
mod job_status;
mod start_job;
mod stop_job;

pub use execute_sql::execute_sql_handler;
pub use health::{
    health_flink_handler, health_handler, health_oceanbase_handler, health_starrocks_handler,
};
pub use job_status::job_status_handler;
pub use start_job::start_job_handler;
pub use stop_job::stop_job_handler;
