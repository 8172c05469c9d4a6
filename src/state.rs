//! Application state: the single owner of employees, attendance records,
//! annual leave requests and archived documents.
//!
//! Every mutation goes through [`AppState`]. After it is applied, subscribers
//! are notified with a [`StateEvent`] and the injected [`Persistence`] handler
//! is invoked. Persistence failures are logged and never roll back or fail
//! the mutation.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::broadcast;
use tracing::{debug, error};
use uuid::Uuid;

use crate::db::{Persistence, StoreData};
use crate::error::AppError;
use crate::model::{
    attendance::{Attachment, AttendanceRecord, AttendanceStatus, DEFAULT_CHECK_IN},
    document::{DocumentKind, SavedDocument},
    employee::Employee,
    leave_request::AnnualLeaveRequest,
};
use crate::models::{Backup, RestoreBackup};
use crate::utils::date_utils::format_day;

const EVENT_CAPACITY: usize = 64;

pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// What changed, sent to subscribers after each mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    EmployeeAdded { id: String },
    EmployeeUpdated { id: String },
    EmployeeRemoved { id: String, records: usize, annual_leaves: usize },
    RecordUpserted { employee_id: String, date: String },
    RecordsCleared { count: usize },
    AnnualLeaveAdded { id: String },
    DocumentSaved { id: String },
    DocumentDeleted { id: String },
    DataRestored,
}

pub struct NewEmployee {
    pub id: Option<String>,
    pub name: String,
    pub role: String,
    pub department: String,
    pub join_date: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Default)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub join_date: Option<String>,
    pub avatar_url: Option<String>,
}

pub struct NewAttachment {
    pub name: String,
    pub mime_type: String,
    pub data: String,
}

pub struct NewAnnualLeave {
    pub employee_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: Option<String>,
}

pub struct NewDocument {
    pub doc_type: DocumentKind,
    pub title: String,
    pub date: String,
    pub data: serde_json::Value,
    pub employee_name: Option<String>,
}

pub struct AppState {
    data: StoreData,
    persistence: Arc<dyn Persistence>,
    events: broadcast::Sender<StateEvent>,
    max_attachment_bytes: usize,
}

impl AppState {
    pub fn new(
        data: StoreData,
        persistence: Arc<dyn Persistence>,
        max_attachment_bytes: usize,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            data,
            persistence,
            events,
            max_attachment_bytes,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.events.subscribe()
    }

    fn commit(&self, event: StateEvent) {
        debug!(?event, "State changed");
        // no subscribers is fine
        let _ = self.events.send(event);
        if let Err(e) = self.persistence.save(&self.data) {
            error!(error = ?e, "Failed to persist attendance data");
        }
    }

    // -------------------- reads --------------------

    pub fn employees(&self) -> &[Employee] {
        &self.data.employees
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.data.records
    }

    pub fn annual_leaves(&self) -> &[AnnualLeaveRequest] {
        &self.data.annual_leaves
    }

    pub fn documents(&self) -> &[SavedDocument] {
        &self.data.documents
    }

    pub fn find_employee(&self, id: &str) -> Option<&Employee> {
        self.data.employees.iter().find(|e| e.id == id)
    }

    pub fn employee(&self, id: &str) -> Result<&Employee, AppError> {
        self.find_employee(id)
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))
    }

    pub fn find_document(&self, id: &str) -> Option<&SavedDocument> {
        self.data.documents.iter().find(|d| d.id == id)
    }

    /// Distinct departments in roster order.
    pub fn departments(&self) -> Vec<String> {
        let mut depts: Vec<String> = Vec::new();
        for emp in &self.data.employees {
            if !depts.contains(&emp.department) {
                depts.push(emp.department.clone());
            }
        }
        depts
    }

    pub fn export_backup(&self) -> Backup {
        Backup {
            employees: self.data.employees.clone(),
            records: self.data.records.clone(),
            annual_leaves: self.data.annual_leaves.clone(),
        }
    }

    // -------------------- employees --------------------

    pub fn add_employee(&mut self, new: NewEmployee) -> Result<Employee, AppError> {
        if new.name.trim().is_empty() || new.role.trim().is_empty() || new.department.trim().is_empty()
        {
            return Err(AppError::BadRequest(
                "name, role and department are required".to_string(),
            ));
        }
        let id = new.id.unwrap_or_else(generate_id);
        if self.find_employee(&id).is_some() {
            return Err(AppError::Conflict(format!("Employee id already exists: {}", id)));
        }

        let employee = Employee {
            avatar_url: new
                .avatar_url
                .unwrap_or_else(|| format!("https://picsum.photos/seed/{}/200", id)),
            id,
            name: new.name,
            role: new.role,
            department: new.department,
            join_date: new
                .join_date
                .unwrap_or_else(|| format_day(Utc::now().date_naive())),
        };
        self.data.employees.push(employee.clone());
        self.commit(StateEvent::EmployeeAdded {
            id: employee.id.clone(),
        });
        Ok(employee)
    }

    pub fn update_employee(
        &mut self,
        id: &str,
        changes: EmployeeChanges,
    ) -> Result<Employee, AppError> {
        let employee = self
            .data
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

        if let Some(name) = changes.name {
            employee.name = name;
        }
        if let Some(role) = changes.role {
            employee.role = role;
        }
        if let Some(department) = changes.department {
            employee.department = department;
        }
        if let Some(join_date) = changes.join_date {
            employee.join_date = join_date;
        }
        if let Some(avatar_url) = changes.avatar_url {
            employee.avatar_url = avatar_url;
        }

        let updated = employee.clone();
        self.commit(StateEvent::EmployeeUpdated { id: updated.id.clone() });
        Ok(updated)
    }

    /// Removes the employee with every attendance record and annual leave
    /// request that references it.
    pub fn remove_employee(&mut self, id: &str) -> Result<Employee, AppError> {
        let pos = self
            .data
            .employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;
        let removed = self.data.employees.remove(pos);

        let records_before = self.data.records.len();
        self.data.records.retain(|r| r.employee_id != id);
        let leaves_before = self.data.annual_leaves.len();
        self.data.annual_leaves.retain(|l| l.employee_id != id);

        self.commit(StateEvent::EmployeeRemoved {
            id: removed.id.clone(),
            records: records_before - self.data.records.len(),
            annual_leaves: leaves_before - self.data.annual_leaves.len(),
        });
        Ok(removed)
    }

    // -------------------- attendance --------------------

    /// Index of the single record for `(employee_id, day)`, collapsing any
    /// duplicates that came in through a restore.
    fn record_slot(&mut self, employee_id: &str, day: NaiveDate) -> Option<usize> {
        let pos = self
            .data
            .records
            .iter()
            .position(|r| r.is_for(employee_id, day))?;
        let keep_id = self.data.records[pos].id.clone();
        self.data
            .records
            .retain(|r| !r.is_for(employee_id, day) || r.id == keep_id);
        self.data.records.iter().position(|r| r.id == keep_id)
    }

    /// Marks a grid cell. Replaces the status of the day's record, keeping its
    /// attachments and notes, or creates the record when there is none.
    /// Present stamps the default check-in time, anything else clears it.
    pub fn set_status(
        &mut self,
        employee_id: &str,
        day: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<AttendanceRecord, AppError> {
        self.employee(employee_id)?;

        let check_in_time =
            (status == AttendanceStatus::Present).then(|| DEFAULT_CHECK_IN.to_string());
        let record = match self.record_slot(employee_id, day) {
            Some(pos) => {
                let record = &mut self.data.records[pos];
                record.status = status;
                record.check_in_time = check_in_time;
                record.date = format_day(day);
                record.clone()
            }
            None => {
                let record = AttendanceRecord {
                    id: generate_id(),
                    employee_id: employee_id.to_string(),
                    date: format_day(day),
                    status,
                    notes: None,
                    check_in_time,
                    attachments: vec![],
                };
                self.data.records.push(record.clone());
                record
            }
        };

        self.commit(StateEvent::RecordUpserted {
            employee_id: employee_id.to_string(),
            date: record.date.clone(),
        });
        Ok(record)
    }

    /// Appends a file to the day's record, creating the record as Present if
    /// the day is unmarked.
    pub fn add_attachment(
        &mut self,
        employee_id: &str,
        day: NaiveDate,
        new: NewAttachment,
    ) -> Result<AttendanceRecord, AppError> {
        self.employee(employee_id)?;

        let attachment = Attachment {
            id: generate_id(),
            name: new.name,
            mime_type: new.mime_type,
            data: new.data,
            created_at: Utc::now(),
        };
        if attachment.payload_bytes() > self.max_attachment_bytes {
            return Err(AppError::BadRequest(format!(
                "Attachment too large, max {} bytes",
                self.max_attachment_bytes
            )));
        }

        let pos = match self.record_slot(employee_id, day) {
            Some(pos) => pos,
            None => {
                self.data.records.push(AttendanceRecord {
                    id: generate_id(),
                    employee_id: employee_id.to_string(),
                    date: format_day(day),
                    status: AttendanceStatus::Present,
                    notes: None,
                    check_in_time: None,
                    attachments: vec![],
                });
                self.data.records.len() - 1
            }
        };
        let record = &mut self.data.records[pos];
        record.attachments.push(attachment);
        let record = record.clone();

        self.commit(StateEvent::RecordUpserted {
            employee_id: employee_id.to_string(),
            date: record.date.clone(),
        });
        Ok(record)
    }

    pub fn delete_attachment(
        &mut self,
        employee_id: &str,
        day: NaiveDate,
        attachment_id: &str,
    ) -> Result<AttendanceRecord, AppError> {
        let record = self
            .data
            .records
            .iter_mut()
            .find(|r| r.is_for(employee_id, day))
            .ok_or_else(|| AppError::NotFound("Attendance record not found".to_string()))?;

        let before = record.attachments.len();
        record.attachments.retain(|a| a.id != attachment_id);
        if record.attachments.len() == before {
            return Err(AppError::NotFound("Attachment not found".to_string()));
        }
        let record = record.clone();

        self.commit(StateEvent::RecordUpserted {
            employee_id: employee_id.to_string(),
            date: record.date.clone(),
        });
        Ok(record)
    }

    /// Drops every attendance record. Employees and leave are kept.
    pub fn clear_records(&mut self) -> usize {
        let count = self.data.records.len();
        self.data.records.clear();
        self.commit(StateEvent::RecordsCleared { count });
        count
    }

    // -------------------- annual leave --------------------

    pub fn add_annual_leave(&mut self, new: NewAnnualLeave) -> Result<AnnualLeaveRequest, AppError> {
        self.employee(&new.employee_id)?;
        if new.end_date < new.start_date {
            return Err(AppError::BadRequest(
                "start_date cannot be after end_date".to_string(),
            ));
        }

        let days = (new.end_date - new.start_date).num_days() + 1;
        let leave = AnnualLeaveRequest {
            id: generate_id(),
            employee_id: new.employee_id,
            start_date: format_day(new.start_date),
            end_date: format_day(new.end_date),
            duration: new.duration.unwrap_or_else(|| days.to_string()),
            created_at: Utc::now(),
        };
        self.data.annual_leaves.push(leave.clone());
        self.commit(StateEvent::AnnualLeaveAdded { id: leave.id.clone() });
        Ok(leave)
    }

    // -------------------- backup --------------------

    /// Replaces the data set from a backup file. Employees and records are
    /// required; leaves are replaced only when present. The archive is kept.
    /// A file listing the same employee id twice is rejected untouched.
    pub fn restore_backup(&mut self, backup: RestoreBackup) -> Result<(), AppError> {
        let (Some(employees), Some(records)) = (backup.employees, backup.records) else {
            return Err(AppError::BadRequest(
                "Invalid backup file: employees and records are required".to_string(),
            ));
        };

        let mut seen = HashSet::new();
        if let Some(dup) = employees.iter().find(|e| !seen.insert(e.id.as_str())) {
            return Err(AppError::BadRequest(format!(
                "Invalid backup file: duplicate employee id {}",
                dup.id
            )));
        }

        self.data.employees = employees;
        self.data.records = records;
        if let Some(leaves) = backup.annual_leaves {
            self.data.annual_leaves = leaves;
        }
        self.commit(StateEvent::DataRestored);
        Ok(())
    }

    // -------------------- archive --------------------

    pub fn save_document(&mut self, new: NewDocument) -> SavedDocument {
        let doc = SavedDocument {
            id: generate_id(),
            doc_type: new.doc_type,
            title: new.title,
            date: new.date,
            created_at: Utc::now(),
            data: new.data,
            employee_name: new.employee_name,
        };
        self.data.documents.insert(0, doc.clone());
        self.commit(StateEvent::DocumentSaved { id: doc.id.clone() });
        doc
    }

    pub fn delete_document(&mut self, id: &str) -> Result<(), AppError> {
        let pos = self
            .data
            .documents
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;
        self.data.documents.remove(pos);
        self.commit(StateEvent::DocumentDeleted { id: id.to_string() });
        Ok(())
    }
}
