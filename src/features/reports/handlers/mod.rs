pub mod report_handler;

pub use report_handler::{
    __path_create_report, __path_get_report, __path_get_summary, __path_list_reports,
    __path_update_report, create_report, get_report, get_summary, list_reports, update_report,
};
