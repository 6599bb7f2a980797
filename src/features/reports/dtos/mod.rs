mod report_dto;

pub use report_dto::{ReportResponseDto, SubmitReportBodyDto, SubmitReportDto};
