use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_org_tables::Migration),
            Box::new(m20250101_000002_create_lookup_tables::Migration),
            Box::new(m20250101_000003_create_employees_table::Migration),
            Box::new(m20250101_000004_create_requisitions_table::Migration),
            Box::new(m20250101_000005_create_tenders_table::Migration),
            Box::new(m20250101_000006_create_contracts_table::Migration),
            Box::new(m20250101_000007_create_committee_tables::Migration),
            Box::new(m20250101_000008_create_user_accounts_table::Migration),
        ]
    }
}

// Migration implementations

mod m20250101_000001_create_org_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000001_create_org_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Regions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Regions::Id)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Regions::Name).string().not_null())
                        .col(
                            ColumnDef::new(Regions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Regions::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_regions_name")
                        .table(Regions::Table)
                        .col(Regions::Name)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Departments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Departments::Id)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Departments::Name).string().not_null())
                        .col(
                            ColumnDef::new(Departments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Departments::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_departments_name")
                        .table(Departments::Table)
                        .col(Departments::Name)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Divisions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Divisions::Id)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Divisions::Name).string().not_null())
                        .col(
                            ColumnDef::new(Divisions::DepartmentId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Divisions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Divisions::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Division names repeat across departments, so the unique key is
            // the pair.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_divisions_department_name")
                        .table(Divisions::Table)
                        .col(Divisions::DepartmentId)
                        .col(Divisions::Name)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Sections::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Sections::Id)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Sections::Name).string().not_null())
                        .col(
                            ColumnDef::new(Sections::DivisionId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Sections::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Sections::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_sections_division_name")
                        .table(Sections::Table)
                        .col(Sections::DivisionId)
                        .col(Sections::Name)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Sections::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Divisions::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Departments::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Regions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Regions {
        Table,
        Id,
        Name,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Departments {
        Table,
        Id,
        Name,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Divisions {
        Table,
        Id,
        Name,
        DepartmentId,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum Sections {
        Table,
        Id,
        Name,
        DivisionId,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000002_create_lookup_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000002_create_lookup_tables"
        }
    }

    async fn create_lookup<T>(
        manager: &SchemaManager<'_>,
        table: T,
        id: T,
        name: T,
        description: T,
        created_at: T,
        updated_at: T,
        index_name: &str,
    ) -> Result<(), DbErr>
    where
        T: Iden + Copy + 'static,
    {
        manager
            .create_table(
                Table::create()
                    .table(table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(id)
                            .big_integer()
                            .auto_increment()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(name).string().not_null())
                    .col(ColumnDef::new(description).string().null())
                    .col(
                        ColumnDef::new(created_at)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(updated_at)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name(index_name)
                    .table(table)
                    .col(name)
                    .to_owned(),
            )
            .await
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            create_lookup(
                manager,
                ProcurementTypes::Table,
                ProcurementTypes::Id,
                ProcurementTypes::Name,
                ProcurementTypes::Description,
                ProcurementTypes::CreatedAt,
                ProcurementTypes::UpdatedAt,
                "idx_procurement_types_name",
            )
            .await?;

            create_lookup(
                manager,
                LoaStatuses::Table,
                LoaStatuses::Id,
                LoaStatuses::Name,
                LoaStatuses::Description,
                LoaStatuses::CreatedAt,
                LoaStatuses::UpdatedAt,
                "idx_loa_statuses_name",
            )
            .await?;

            create_lookup(
                manager,
                ContractStatuses::Table,
                ContractStatuses::Id,
                ContractStatuses::Name,
                ContractStatuses::Description,
                ContractStatuses::CreatedAt,
                ContractStatuses::UpdatedAt,
                "idx_contract_statuses_name",
            )
            .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ContractStatuses::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(LoaStatuses::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProcurementTypes::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden, Clone, Copy)]
    pub(super) enum ProcurementTypes {
        Table,
        Id,
        Name,
        Description,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden, Clone, Copy)]
    pub(super) enum LoaStatuses {
        Table,
        Id,
        Name,
        Description,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden, Clone, Copy)]
    pub(super) enum ContractStatuses {
        Table,
        Id,
        Name,
        Description,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000003_create_employees_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000003_create_employees_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Employees::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Employees::Id)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Employees::EmployeeId).string().not_null())
                        .col(ColumnDef::new(Employees::FirstName).string().not_null())
                        .col(ColumnDef::new(Employees::LastName).string().not_null())
                        .col(ColumnDef::new(Employees::Email).string().not_null())
                        .col(ColumnDef::new(Employees::Phone).string().null())
                        .col(ColumnDef::new(Employees::DepartmentId).big_integer().null())
                        .col(ColumnDef::new(Employees::DivisionId).big_integer().null())
                        .col(ColumnDef::new(Employees::SectionId).big_integer().null())
                        .col(ColumnDef::new(Employees::JobTitle).string().null())
                        .col(
                            ColumnDef::new(Employees::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Employees::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Employees::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_employees_employee_id")
                        .table(Employees::Table)
                        .col(Employees::EmployeeId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_employees_email")
                        .table(Employees::Table)
                        .col(Employees::Email)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_employees_department_id")
                        .table(Employees::Table)
                        .col(Employees::DepartmentId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Employees::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Employees {
        Table,
        Id,
        EmployeeId,
        FirstName,
        LastName,
        Email,
        Phone,
        DepartmentId,
        DivisionId,
        SectionId,
        JobTitle,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000004_create_requisitions_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000004_create_requisitions_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Requisitions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Requisitions::Id)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Requisitions::RequisitionNumber)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Requisitions::Description).string().not_null())
                        .col(ColumnDef::new(Requisitions::ShoppingCartNo).string().null())
                        .col(
                            ColumnDef::new(Requisitions::ShoppingCartAmount)
                                .decimal()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Requisitions::ShoppingCartStatus)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Requisitions::ProcurementCategory)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Requisitions::RegionId).big_integer().null())
                        .col(
                            ColumnDef::new(Requisitions::DepartmentId)
                                .big_integer()
                                .null(),
                        )
                        .col(ColumnDef::new(Requisitions::DivisionId).big_integer().null())
                        .col(ColumnDef::new(Requisitions::SectionId).big_integer().null())
                        .col(
                            ColumnDef::new(Requisitions::AssignedEmployeeId)
                                .big_integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Requisitions::CreatedByEmployeeId)
                                .big_integer()
                                .null(),
                        )
                        .col(ColumnDef::new(Requisitions::DateAssigned).date().null())
                        .col(ColumnDef::new(Requisitions::CreationDeadline).date().null())
                        .col(
                            ColumnDef::new(Requisitions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Requisitions::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_requisitions_number")
                        .table(Requisitions::Table)
                        .col(Requisitions::RequisitionNumber)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_requisitions_assigned_employee")
                        .table(Requisitions::Table)
                        .col(Requisitions::AssignedEmployeeId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_requisitions_creation_deadline")
                        .table(Requisitions::Table)
                        .col(Requisitions::CreationDeadline)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Requisitions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Requisitions {
        Table,
        Id,
        RequisitionNumber,
        Description,
        ShoppingCartNo,
        ShoppingCartAmount,
        ShoppingCartStatus,
        ProcurementCategory,
        RegionId,
        DepartmentId,
        DivisionId,
        SectionId,
        AssignedEmployeeId,
        CreatedByEmployeeId,
        DateAssigned,
        CreationDeadline,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000005_create_tenders_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000005_create_tenders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Tenders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Tenders::Id)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Tenders::TenderNumber).string().not_null())
                        .col(ColumnDef::new(Tenders::RequisitionId).big_integer().null())
                        .col(ColumnDef::new(Tenders::Description).string().not_null())
                        .col(
                            ColumnDef::new(Tenders::ProcurementTypeId)
                                .big_integer()
                                .null(),
                        )
                        .col(ColumnDef::new(Tenders::Eligibility).string().not_null())
                        .col(ColumnDef::new(Tenders::AgpoCategory).string().null())
                        .col(
                            ColumnDef::new(Tenders::CreatedByEmployeeId)
                                .big_integer()
                                .null(),
                        )
                        .col(ColumnDef::new(Tenders::EgpReference).string().null())
                        .col(ColumnDef::new(Tenders::InternalReference).string().null())
                        .col(ColumnDef::new(Tenders::TenderCreationDate).date().null())
                        .col(ColumnDef::new(Tenders::ProposedAdvertDate).date().null())
                        .col(ColumnDef::new(Tenders::TenderAdvertDate).date().null())
                        .col(ColumnDef::new(Tenders::TenderClosingDate).date().null())
                        .col(ColumnDef::new(Tenders::TenderClosingTime).time().null())
                        .col(ColumnDef::new(Tenders::TenderOpeningDate).date().null())
                        .col(ColumnDef::new(Tenders::TenderOpeningTime).time().null())
                        .col(ColumnDef::new(Tenders::TenderValidityDays).integer().null())
                        .col(
                            ColumnDef::new(Tenders::TenderValidityExpiryDate)
                                .date()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Tenders::TenderEvaluationDurationDays)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Tenders::TenderEvaluationEndDate)
                                .date()
                                .null(),
                        )
                        .col(ColumnDef::new(Tenders::EstimatedValue).decimal().null())
                        .col(
                            ColumnDef::new(Tenders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Tenders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_tenders_number")
                        .table(Tenders::Table)
                        .col(Tenders::TenderNumber)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_tenders_requisition_id")
                        .table(Tenders::Table)
                        .col(Tenders::RequisitionId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_tenders_closing_date")
                        .table(Tenders::Table)
                        .col(Tenders::TenderClosingDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Tenders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Tenders {
        Table,
        Id,
        TenderNumber,
        RequisitionId,
        Description,
        ProcurementTypeId,
        Eligibility,
        AgpoCategory,
        CreatedByEmployeeId,
        EgpReference,
        InternalReference,
        TenderCreationDate,
        ProposedAdvertDate,
        TenderAdvertDate,
        TenderClosingDate,
        TenderClosingTime,
        TenderOpeningDate,
        TenderOpeningTime,
        TenderValidityDays,
        TenderValidityExpiryDate,
        TenderEvaluationDurationDays,
        TenderEvaluationEndDate,
        EstimatedValue,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000006_create_contracts_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000006_create_contracts_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Contracts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Contracts::Id)
                                .big_integer()
                                .auto_increment()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Contracts::TenderId).big_integer().not_null())
                        .col(ColumnDef::new(Contracts::ContractReference).string().null())
                        .col(
                            ColumnDef::new(Contracts::CreatedByEmployeeId)
                                .big_integer()
                                .null(),
                        )
                        .col(ColumnDef::new(Contracts::LoaStatusId).big_integer().null())
                        .col(
                            ColumnDef::new(Contracts::ContractStatusId)
                                .big_integer()
                                .null(),
                        )
                        .col(ColumnDef::new(Contracts::SupplierName).string().null())
                        .col(ColumnDef::new(Contracts::SupplierCounty).string().null())
                        .col(ColumnDef::new(Contracts::EPurchaseOrderNo).string().null())
                        .col(
                            ColumnDef::new(Contracts::SapPurchaseOrderNo)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Contracts::ContractSignatureDate)
                                .date()
                                .null(),
                        )
                        .col(ColumnDef::new(Contracts::CommencementDate).date().null())
                        .col(ColumnDef::new(Contracts::ContractDuration).integer().null())
                        .col(
                            ColumnDef::new(Contracts::ContractDurationMeasure)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(Contracts::ContractExpiryDate).date().null())
                        .col(
                            ColumnDef::new(Contracts::ContractDeliveryPeriod)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Contracts::ContractDeliveryPeriodMeasure)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(Contracts::ContractValue).decimal().null())
                        .col(
                            ColumnDef::new(Contracts::TenderSecurityValue)
                                .decimal()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Contracts::TenderSecurityValidityDays)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Contracts::TenderSecurityExpiryDate)
                                .date()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Contracts::PerformanceSecurityAmount)
                                .decimal()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Contracts::PerformanceSecurityDurationDays)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Contracts::PerformanceSecurityExpiryDate)
                                .date()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Contracts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Contracts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // One contract per tender.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_contracts_tender_id")
                        .table(Contracts::Table)
                        .col(Contracts::TenderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_contracts_expiry_date")
                        .table(Contracts::Table)
                        .col(Contracts::ContractExpiryDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Contracts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Contracts {
        Table,
        Id,
        TenderId,
        ContractReference,
        CreatedByEmployeeId,
        LoaStatusId,
        ContractStatusId,
        SupplierName,
        SupplierCounty,
        EPurchaseOrderNo,
        SapPurchaseOrderNo,
        ContractSignatureDate,
        CommencementDate,
        ContractDuration,
        ContractDurationMeasure,
        ContractExpiryDate,
        ContractDeliveryPeriod,
        ContractDeliveryPeriodMeasure,
        ContractValue,
        TenderSecurityValue,
        TenderSecurityValidityDays,
        TenderSecurityExpiryDate,
        PerformanceSecurityAmount,
        PerformanceSecurityDurationDays,
        PerformanceSecurityExpiryDate,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000007_create_committee_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000007_create_committee_tables"
        }
    }

    async fn create_committee<T>(
        manager: &SchemaManager<'_>,
        table: T,
        id: T,
        parent_id: T,
        employee_id: T,
        role: T,
        added_at: T,
        index_name: &str,
    ) -> Result<(), DbErr>
    where
        T: Iden + Copy + 'static,
    {
        manager
            .create_table(
                Table::create()
                    .table(table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(id)
                            .big_integer()
                            .auto_increment()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(parent_id).big_integer().not_null())
                    .col(ColumnDef::new(employee_id).big_integer().not_null())
                    .col(ColumnDef::new(role).string().null())
                    .col(
                        ColumnDef::new(added_at)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // An employee sits on a given committee at most once.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name(index_name)
                    .table(table)
                    .col(parent_id)
                    .col(employee_id)
                    .to_owned(),
            )
            .await
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            create_committee(
                manager,
                OpeningCommittee::Table,
                OpeningCommittee::Id,
                OpeningCommittee::TenderId,
                OpeningCommittee::EmployeeId,
                OpeningCommittee::Role,
                OpeningCommittee::AddedAt,
                "idx_opening_committee_tender_employee",
            )
            .await?;

            create_committee(
                manager,
                EvaluationCommittee::Table,
                EvaluationCommittee::Id,
                EvaluationCommittee::TenderId,
                EvaluationCommittee::EmployeeId,
                EvaluationCommittee::Role,
                EvaluationCommittee::AddedAt,
                "idx_evaluation_committee_tender_employee",
            )
            .await?;

            create_committee(
                manager,
                CitCommittee::Table,
                CitCommittee::Id,
                CitCommittee::ContractId,
                CitCommittee::EmployeeId,
                CitCommittee::Role,
                CitCommittee::AddedAt,
                "idx_cit_committee_contract_employee",
            )
            .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CitCommittee::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(EvaluationCommittee::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(OpeningCommittee::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden, Clone, Copy)]
    pub(super) enum OpeningCommittee {
        #[sea_orm(iden = "tender_opening_committee")]
        Table,
        Id,
        TenderId,
        EmployeeId,
        Role,
        AddedAt,
    }

    #[derive(DeriveIden, Clone, Copy)]
    pub(super) enum EvaluationCommittee {
        #[sea_orm(iden = "tender_evaluation_committee")]
        Table,
        Id,
        TenderId,
        EmployeeId,
        Role,
        AddedAt,
    }

    #[derive(DeriveIden, Clone, Copy)]
    pub(super) enum CitCommittee {
        #[sea_orm(iden = "contract_cit_committee")]
        Table,
        Id,
        ContractId,
        EmployeeId,
        Role,
        AddedAt,
    }
}

mod m20250101_000008_create_user_accounts_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000008_create_user_accounts_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(UserAccounts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UserAccounts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UserAccounts::Username).string().not_null())
                        .col(
                            ColumnDef::new(UserAccounts::PasswordHash)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UserAccounts::Role).string().not_null())
                        .col(ColumnDef::new(UserAccounts::EmployeeId).big_integer().null())
                        .col(
                            ColumnDef::new(UserAccounts::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(UserAccounts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(UserAccounts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_user_accounts_username")
                        .table(UserAccounts::Table)
                        .col(UserAccounts::Username)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UserAccounts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum UserAccounts {
        Table,
        Id,
        Username,
        PasswordHash,
        Role,
        EmployeeId,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }
}
