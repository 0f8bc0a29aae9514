/*!
 * Reporting functionality for projcat
 *
 * Renders a summary of a finished run as console tables using the tabled
 * library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::utils::{format_file_size, format_number};

/// Information about a file in the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
}

/// Statistics for a finished run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// Time taken by the whole run
    pub duration: Duration,
    /// Number of files selected
    pub files_selected: usize,
    /// Number of selected files that could not be read
    pub files_failed: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Total number of characters
    pub total_chars: usize,
    /// Size of the output file in bytes
    pub output_bytes: u64,
    /// Details for each file, in output order
    pub file_details: Vec<(String, FileReportInfo)>,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string based on run statistics
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Keep the tail of long paths, cut at a separator
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let mut segments = Vec::new();
        let mut current_len = 3; // "..."
        for part in path.split('/').rev() {
            let part_len = part.chars().count() + 1;
            if current_len + part_len > max_len {
                break;
            }
            segments.push(part);
            current_len += part_len;
        }

        if segments.is_empty() {
            let tail: String = path
                .chars()
                .rev()
                .take(max_len.saturating_sub(3))
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            return format!("...{}", tail);
        }

        let mut result = String::from("...");
        for part in segments.iter().rev() {
            result.push('/');
            result.push_str(part);
        }
        result
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "Output File".to_string(),
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "Files Selected".to_string(),
                value: format_number(report.files_selected),
            },
        ];

        if report.files_failed > 0 {
            rows.push(SummaryRow {
                key: "Read Errors".to_string(),
                value: format_number(report.files_failed),
            });
        }

        rows.push(SummaryRow {
            key: "Total Lines".to_string(),
            value: format_number(report.total_lines),
        });
        rows.push(SummaryRow {
            key: "Output Size".to_string(),
            value: format_file_size(report.output_bytes),
        });
        rows.push(SummaryRow {
            key: "LLM Tokens".to_string(),
            value: format!("{} tokens (estimated)", format_number(report.total_chars / 4)),
        });

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        // Largest files first
        let mut files: Vec<_> = report.file_details.iter().collect();
        files.sort_by(|(_, a), (_, b)| b.chars.cmp(&a.chars));

        let files_to_show = if files.len() > 15 {
            &files[0..10]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|(path, info)| FileRow {
                path: self.format_path(path, 60),
                lines: format_number(info.lines),
                tokens: format_number(info.chars / 4),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &ScanReport) -> String {
        let summary_table = self.create_summary_table(report);
        let files_table = self.create_files_table(report);

        let files_title = if report.file_details.len() > 15 {
            "TOP 10 LARGEST FILES BY CHARACTER COUNT"
        } else {
            "PROCESSED FILES"
        };

        format!(
            "{}\n{}\n\nSUMMARY\n{}",
            files_title, files_table, summary_table
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report(file_count: usize) -> ScanReport {
        let file_details = (0..file_count)
            .map(|i| {
                (
                    format!("src/file_{}.py", i),
                    FileReportInfo {
                        lines: i,
                        chars: i * 10,
                    },
                )
            })
            .collect();

        ScanReport {
            output_file: "out.txt".to_string(),
            duration: Duration::from_millis(12),
            files_selected: file_count,
            files_failed: 0,
            total_lines: 42,
            total_chars: 400,
            output_bytes: 2048,
            file_details,
        }
    }

    #[test]
    fn test_report_lists_files_and_summary() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        let text = reporter.generate_report(&sample_report(3));

        assert!(text.contains("PROCESSED FILES"));
        assert!(text.contains("src/file_2.py"));
        assert!(text.contains("out.txt"));
        assert!(text.contains("2.00 KB"));
        assert!(!text.contains("Read Errors"));
    }

    #[test]
    fn test_large_reports_show_top_ten() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        let text = reporter.generate_report(&sample_report(20));

        assert!(text.contains("TOP 10 LARGEST FILES"));
        assert!(text.contains("src/file_19.py"));
        assert!(!text.contains("src/file_0.py"));
    }

    #[test]
    fn test_format_path_keeps_tail() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        let long = "/very/long/directory/name/that/keeps/going/and/going/forever/main.py";
        let short = reporter.format_path(long, 30);

        assert!(short.starts_with("..."));
        assert!(short.ends_with("/main.py"));
        assert!(short.chars().count() <= 30);
    }
}
