//! Bulk import execution: walks parsed rows sequentially with per-row
//! create-or-update semantics. Rows with missing required values or
//! unresolvable parent names are skipped with a collected warning; the
//! batch always runs to the end.

use crate::{
    db::DbPool,
    entities::{
        contract_status, department, division, employee, loa_status, procurement_type, region,
        section,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    imports::{parse_csv, validate_columns, ImportRecord, ImportReport, ImportTarget},
    services::org::OrgService,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, IntoActiveModel, Set};
use std::sync::Arc;
use tracing::{info, instrument};

use super::employees::EmployeeService;

/// Service running bulk imports
#[derive(Clone)]
pub struct ImportService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    org: OrgService,
    employees: EmployeeService,
}

impl ImportService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        org: OrgService,
        employees: EmployeeService,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            org,
            employees,
        }
    }

    /// Parses CSV text and imports it into the target entity.
    #[instrument(skip(self, csv_text))]
    pub async fn import_csv(
        &self,
        target: ImportTarget,
        csv_text: &str,
    ) -> Result<ImportReport, ServiceError> {
        let table = parse_csv(csv_text)?;
        validate_columns(target, &table.headers)?;

        let mut report = ImportReport::default();
        for (i, row) in table.rows.iter().enumerate() {
            // Header is line 1; data starts at line 2.
            let line = i + 2;
            self.import_row(target, row, line, &mut report).await?;
        }

        info!(
            target_entity = %target,
            created = report.created,
            updated = report.updated,
            skipped = report.skipped,
            "Bulk import finished"
        );
        let _ = self
            .event_sender
            .send(Event::ImportCompleted {
                target: target.to_string(),
                created: report.created,
                updated: report.updated,
                skipped: report.skipped,
            })
            .await;

        Ok(report)
    }

    async fn import_row(
        &self,
        target: ImportTarget,
        row: &ImportRecord,
        line: usize,
        report: &mut ImportReport,
    ) -> Result<(), ServiceError> {
        match target {
            ImportTarget::Region => self.import_region(row, line, report).await,
            ImportTarget::Department => self.import_department(row, line, report).await,
            ImportTarget::Division => self.import_division(row, line, report).await,
            ImportTarget::Section => self.import_section(row, line, report).await,
            ImportTarget::ProcurementType => {
                self.import_procurement_type(row, line, report).await
            }
            ImportTarget::LoaStatus => self.import_loa_status(row, line, report).await,
            ImportTarget::ContractStatus => self.import_contract_status(row, line, report).await,
            ImportTarget::Employee => self.import_employee(row, line, report).await,
        }
    }

    async fn import_region(
        &self,
        row: &ImportRecord,
        line: usize,
        report: &mut ImportReport,
    ) -> Result<(), ServiceError> {
        let Some(name) = row.get("name") else {
            report.skip(line, "missing required value 'name'");
            return Ok(());
        };

        if self.org.find_region_by_name(name).await?.is_some() {
            report.updated += 1;
            return Ok(());
        }

        let now = Utc::now();
        region::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(ServiceError::DatabaseError)?;
        report.created += 1;
        Ok(())
    }

    async fn import_department(
        &self,
        row: &ImportRecord,
        line: usize,
        report: &mut ImportReport,
    ) -> Result<(), ServiceError> {
        let Some(name) = row.get("name") else {
            report.skip(line, "missing required value 'name'");
            return Ok(());
        };

        if self.org.find_department_by_name(name).await?.is_some() {
            report.updated += 1;
            return Ok(());
        }

        let now = Utc::now();
        department::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(ServiceError::DatabaseError)?;
        report.created += 1;
        Ok(())
    }

    async fn import_division(
        &self,
        row: &ImportRecord,
        line: usize,
        report: &mut ImportReport,
    ) -> Result<(), ServiceError> {
        let (Some(name), Some(department_name)) = (row.get("name"), row.get("department_name"))
        else {
            report.skip(line, "missing required value 'name' or 'department_name'");
            return Ok(());
        };

        let Some(department) = self.org.find_department_by_name(department_name).await? else {
            report.skip(
                line,
                format!("department '{}' not found", department_name),
            );
            return Ok(());
        };

        if self
            .org
            .find_division_by_name(name, Some(department.id))
            .await?
            .is_some()
        {
            report.updated += 1;
            return Ok(());
        }

        let now = Utc::now();
        division::ActiveModel {
            name: Set(name.to_string()),
            department_id: Set(department.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(ServiceError::DatabaseError)?;
        report.created += 1;
        Ok(())
    }

    async fn import_section(
        &self,
        row: &ImportRecord,
        line: usize,
        report: &mut ImportReport,
    ) -> Result<(), ServiceError> {
        let (Some(name), Some(division_name)) = (row.get("name"), row.get("division_name")) else {
            report.skip(line, "missing required value 'name' or 'division_name'");
            return Ok(());
        };

        let division = match self.org.find_division_by_name(division_name, None).await {
            Ok(Some(d)) => d,
            Ok(None) => {
                report.skip(line, format!("division '{}' not found", division_name));
                return Ok(());
            }
            Err(ServiceError::InvalidInput(msg)) => {
                report.skip(line, msg);
                return Ok(());
            }
            Err(other) => return Err(other),
        };

        if self
            .org
            .find_section_by_name(name, Some(division.id))
            .await?
            .is_some()
        {
            report.updated += 1;
            return Ok(());
        }

        let now = Utc::now();
        section::ActiveModel {
            name: Set(name.to_string()),
            division_id: Set(division.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(ServiceError::DatabaseError)?;
        report.created += 1;
        Ok(())
    }

    async fn import_procurement_type(
        &self,
        row: &ImportRecord,
        line: usize,
        report: &mut ImportReport,
    ) -> Result<(), ServiceError> {
        let Some(name) = row.get("name") else {
            report.skip(line, "missing required value 'name'");
            return Ok(());
        };

        if self
            .org
            .find_procurement_type_by_name(name)
            .await?
            .is_some()
        {
            report.updated += 1;
            return Ok(());
        }

        let now = Utc::now();
        procurement_type::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(ServiceError::DatabaseError)?;
        report.created += 1;
        Ok(())
    }

    async fn import_loa_status(
        &self,
        row: &ImportRecord,
        line: usize,
        report: &mut ImportReport,
    ) -> Result<(), ServiceError> {
        let Some(name) = row.get("name") else {
            report.skip(line, "missing required value 'name'");
            return Ok(());
        };

        if self.org.find_loa_status_by_name(name).await?.is_some() {
            report.updated += 1;
            return Ok(());
        }

        let now = Utc::now();
        loa_status::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(ServiceError::DatabaseError)?;
        report.created += 1;
        Ok(())
    }

    async fn import_contract_status(
        &self,
        row: &ImportRecord,
        line: usize,
        report: &mut ImportReport,
    ) -> Result<(), ServiceError> {
        let Some(name) = row.get("name") else {
            report.skip(line, "missing required value 'name'");
            return Ok(());
        };

        if self.org.find_contract_status_by_name(name).await?.is_some() {
            report.updated += 1;
            return Ok(());
        }

        let now = Utc::now();
        contract_status::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.db_pool)
        .await
        .map_err(ServiceError::DatabaseError)?;
        report.created += 1;
        Ok(())
    }

    async fn import_employee(
        &self,
        row: &ImportRecord,
        line: usize,
        report: &mut ImportReport,
    ) -> Result<(), ServiceError> {
        let (Some(staff_no), Some(first_name), Some(last_name), Some(email)) = (
            row.get("employee_id"),
            row.get("first_name"),
            row.get("last_name"),
            row.get("email"),
        ) else {
            report.skip(
                line,
                "missing one of 'employee_id', 'first_name', 'last_name', 'email'",
            );
            return Ok(());
        };

        // Optional org references resolve by name; a bad name skips the
        // row rather than silently dropping the link.
        let department = match row.get("department_name") {
            Some(dept_name) => match self.org.find_department_by_name(dept_name).await? {
                Some(d) => Some(d),
                None => {
                    report.skip(line, format!("department '{}' not found", dept_name));
                    return Ok(());
                }
            },
            None => None,
        };

        let division = match row.get("division_name") {
            Some(div_name) => {
                match self
                    .org
                    .find_division_by_name(div_name, department.as_ref().map(|d| d.id))
                    .await
                {
                    Ok(Some(d)) => Some(d),
                    Ok(None) => {
                        report.skip(line, format!("division '{}' not found", div_name));
                        return Ok(());
                    }
                    Err(ServiceError::InvalidInput(msg)) => {
                        report.skip(line, msg);
                        return Ok(());
                    }
                    Err(other) => return Err(other),
                }
            }
            None => None,
        };

        let section = match row.get("section_name") {
            Some(sec_name) => {
                match self
                    .org
                    .find_section_by_name(sec_name, division.as_ref().map(|d| d.id))
                    .await
                {
                    Ok(Some(s)) => Some(s),
                    Ok(None) => {
                        report.skip(line, format!("section '{}' not found", sec_name));
                        return Ok(());
                    }
                    Err(ServiceError::InvalidInput(msg)) => {
                        report.skip(line, msg);
                        return Ok(());
                    }
                    Err(other) => return Err(other),
                }
            }
            None => None,
        };

        let now = Utc::now();
        match self.employees.find_by_staff_number(staff_no).await? {
            Some(existing) => {
                let mut active = existing.into_active_model();
                active.first_name = Set(first_name.to_string());
                active.last_name = Set(last_name.to_string());
                active.email = Set(email.to_string());
                if let Some(phone) = row.get("phone") {
                    active.phone = Set(Some(phone.to_string()));
                }
                if let Some(d) = &department {
                    active.department_id = Set(Some(d.id));
                }
                if let Some(d) = &division {
                    active.division_id = Set(Some(d.id));
                }
                if let Some(s) = &section {
                    active.section_id = Set(Some(s.id));
                }
                if let Some(title) = row.get("job_title") {
                    active.job_title = Set(Some(title.to_string()));
                }
                if let Some(is_active) = row.get_bool("is_active") {
                    active.is_active = Set(is_active);
                }
                active.updated_at = Set(now);
                active
                    .update(&*self.db_pool)
                    .await
                    .map_err(ServiceError::DatabaseError)?;
                report.updated += 1;
            }
            None => {
                employee::ActiveModel {
                    id: ActiveValue::NotSet,
                    employee_id: Set(staff_no.to_string()),
                    first_name: Set(first_name.to_string()),
                    last_name: Set(last_name.to_string()),
                    email: Set(email.to_string()),
                    phone: Set(row.get("phone").map(String::from)),
                    department_id: Set(department.map(|d| d.id)),
                    division_id: Set(division.map(|d| d.id)),
                    section_id: Set(section.map(|s| s.id)),
                    job_title: Set(row.get("job_title").map(String::from)),
                    is_active: Set(row.get_bool("is_active").unwrap_or(true)),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&*self.db_pool)
                .await
                .map_err(ServiceError::DatabaseError)?;
                report.created += 1;
            }
        }

        Ok(())
    }
}
