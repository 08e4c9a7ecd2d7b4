mod report_dto;

pub use report_dto::{
    CreateReportDto, PhotoUpload, ReportResponseDto, UpdateReportDto, UploadReportDto,
};
