//! In-memory [`Database`] for exercising [`Command`]s in tests.
//!
//! [`Command`]: crate::Command

use std::{
    marker::PhantomData,
    sync::{Arc, LazyLock, Mutex, MutexGuard},
};

use common::{
    operations::{By, Commit, Delete, Insert, Lock, Select, Transact, Update},
    Date, DateTime,
};
use tracerr::Traced;

use crate::{
    command::create_booking,
    domain::{
        booking, candidate,
        code::{self, Kind, ShortCode},
        company, user, Booking, Candidate, Code, Company, User,
    },
    infra::{database, Database},
    read, write, Config, Service,
};

/// Password of every [`User`] added via [`Mock::add_user()`].
pub(crate) const PASSWORD: &str = "correct-horse";

/// Hash of the [`PASSWORD`], computed once as hashing is slow.
static PASSWORD_HASH: LazyLock<user::PasswordHash> = LazyLock::new(|| {
    user::PasswordHash::new(&PASSWORD.into()).expect("hashable")
});

/// Creates a new [`Service`] backed by an empty [`Mock`].
pub(crate) fn service() -> (Service<Mock>, Mock) {
    let db = Mock::default();
    let config =
        Config::new(b"test-secret", Config::DEFAULT_SESSION_LIFETIME);
    (Service::new(config, db.clone()), db)
}

/// Builds [`create_booking::Data`] for the provided `date`.
pub(crate) fn booking_data(
    candidate: candidate::Id,
    company: company::Id,
    date: &str,
) -> create_booking::Data {
    create_booking::Data {
        date: Date::parse(date).expect("valid date"),
        candidate,
        company,
        role: ShortCode::new("DEV").expect("valid short code"),
        notes: None,
    }
}

/// Stored [`Code`] of any kind.
#[derive(Clone, Debug)]
struct StoredCode {
    kind: &'static str,
    id: code::Id,
    short_code: ShortCode,
    description: code::Description,
}

impl StoredCode {
    fn typed<K: Kind>(&self) -> Code<K> {
        Code {
            id: self.id,
            short_code: self.short_code.clone(),
            description: self.description.clone(),
            kind: PhantomData,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    candidates: Vec<Candidate>,
    companies: Vec<Company>,
    bookings: Vec<Booking>,
    codes: Vec<StoredCode>,
    candidate_drafts: Vec<write::candidate::Draft>,
    candidate_changes: Vec<write::candidate::Changes>,
    company_changes: Vec<write::company::Changes>,
    writes: Vec<&'static str>,
}

/// In-memory [`Database`] recording every write it performs.
///
/// Transactions are no-ops: every write is applied immediately.
#[derive(Clone, Debug, Default)]
pub(crate) struct Mock(Arc<Mutex<State>>);

impl Mock {
    fn state(&self) -> MutexGuard<'_, State> {
        self.0.lock().expect("not poisoned")
    }

    pub(crate) fn add_user(
        &self,
        email: &str,
        del_permission: bool,
        office_manager: bool,
    ) -> User {
        let user = User {
            id: user::Id::new(),
            name: user::Name::new("Test").expect("valid name"),
            email: user::Email::new(email).expect("valid email"),
            password_hash: PASSWORD_HASH.clone(),
            del_permission,
            office_manager,
            created_at: DateTime::now().coerce(),
        };
        self.state().users.push(user.clone());
        user
    }

    pub(crate) fn add_candidate(&self, forename: &str) -> Candidate {
        self.add_candidate_with(|c| {
            c.forename =
                candidate::Forename::new(forename).expect("valid name");
        })
    }

    /// Stores a new "Jo" [`Candidate`] tweaked by the provided function.
    pub(crate) fn add_candidate_with(
        &self,
        tweak: impl FnOnce(&mut Candidate),
    ) -> Candidate {
        let now = DateTime::now();
        let mut candidate = Candidate {
            id: candidate::Id::new(),
            forename: candidate::Forename::new("Jo").expect("valid name"),
            surname: None,
            email: None,
            phone: None,
            notes: None,
            consultant: None,
            status: ShortCode::new("ACT").expect("valid short code"),
            role: ShortCode::new("DEV").expect("valid short code"),
            created_by: None,
            updated_by: None,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };
        tweak(&mut candidate);
        self.state().candidates.push(candidate.clone());
        candidate
    }

    pub(crate) fn add_company(&self, name: &str) -> Company {
        self.add_company_with(|c| {
            c.name = company::Name::new(name).expect("valid name");
        })
    }

    /// Stores a new "Acme" [`Company`] tweaked by the provided function.
    pub(crate) fn add_company_with(
        &self,
        tweak: impl FnOnce(&mut Company),
    ) -> Company {
        let now = DateTime::now();
        let mut company = Company {
            id: company::Id::new(),
            name: company::Name::new("Acme").expect("valid name"),
            email: None,
            phone: None,
            website: None,
            notes: None,
            consultant: None,
            status: ShortCode::new("CLIENT").expect("valid short code"),
            business_type: ShortCode::new("IT").expect("valid short code"),
            created_by: None,
            updated_by: None,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };
        tweak(&mut company);
        self.state().companies.push(company.clone());
        company
    }

    pub(crate) fn add_booking(
        &self,
        candidate: candidate::Id,
        company: company::Id,
        date: &str,
    ) -> Booking {
        let now = DateTime::now();
        let booking = Booking {
            id: booking::Id::new(),
            date: Date::parse(date).expect("valid date"),
            candidate,
            company,
            role: ShortCode::new("DEV").expect("valid short code"),
            notes: None,
            created_by: None,
            updated_by: None,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };
        self.state().bookings.push(booking.clone());
        booking
    }

    pub(crate) fn add_code<K: Kind>(&self, short_code: &str) -> Code<K> {
        let code = StoredCode {
            kind: K::NAME,
            id: code::Id::new(),
            short_code: ShortCode::new(short_code).expect("valid short code"),
            description: code::Description::new("Test")
                .expect("valid description"),
        };
        self.state().codes.push(code.clone());
        code.typed()
    }

    pub(crate) fn users(&self) -> Vec<User> {
        self.state().users.clone()
    }

    pub(crate) fn candidates(&self) -> Vec<Candidate> {
        self.state().candidates.clone()
    }

    pub(crate) fn companies(&self) -> Vec<Company> {
        self.state().companies.clone()
    }

    pub(crate) fn bookings(&self) -> Vec<Booking> {
        self.state().bookings.clone()
    }

    pub(crate) fn writes(&self) -> Vec<&'static str> {
        self.state().writes.clone()
    }

    pub(crate) fn last_candidate_draft(
        &self,
    ) -> Option<write::candidate::Draft> {
        self.state().candidate_drafts.last().cloned()
    }

    pub(crate) fn last_candidate_changes(
        &self,
    ) -> Option<write::candidate::Changes> {
        self.state().candidate_changes.last().cloned()
    }

    pub(crate) fn last_company_changes(
        &self,
    ) -> Option<write::company::Changes> {
        self.state().company_changes.last().cloned()
    }
}

type Result<T> = std::result::Result<T, Traced<database::Error>>;

impl Database<Transact> for Mock {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<()> {
        Ok(())
    }
}

impl<T, K> Database<Lock<By<T, K>>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Lock<By<T, K>>) -> Result<()> {
        Ok(())
    }
}

impl Database<Select<By<Option<User>, user::Id>>> for Mock {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Option<User>> {
        let id = by.into_inner();
        Ok(self.state().users.iter().find(|u| u.id == id).cloned())
    }
}

impl<'l> Database<Select<By<Option<User>, &'l user::Email>>> for Mock {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, &'l user::Email>>,
    ) -> Result<Option<User>> {
        let email = by.into_inner();
        Ok(self.state().users.iter().find(|u| u.email == *email).cloned())
    }
}

impl Database<Insert<User>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, Insert(user): Insert<User>) -> Result<()> {
        let mut state = self.state();
        state.writes.push("insert user");
        state.users.push(user);
        Ok(())
    }
}

impl Database<Update<User>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, Update(user): Update<User>) -> Result<()> {
        let mut state = self.state();
        state.writes.push("update user");
        if let Some(u) = state.users.iter_mut().find(|u| u.id == user.id) {
            *u = user;
        }
        Ok(())
    }
}

impl Database<Delete<By<User, user::Id>>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<User, user::Id>>,
    ) -> Result<()> {
        let id = by.into_inner();
        let mut state = self.state();
        state.writes.push("delete user");
        state.users.retain(|u| u.id != id);
        Ok(())
    }
}

impl Database<Select<By<Option<Candidate>, candidate::Id>>> for Mock {
    type Ok = Option<Candidate>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Candidate>, candidate::Id>>,
    ) -> Result<Option<Candidate>> {
        let id = by.into_inner();
        Ok(self.state().candidates.iter().find(|c| c.id == id).cloned())
    }
}

impl Database<Insert<write::candidate::Draft>> for Mock {
    type Ok = Candidate;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<write::candidate::Draft>,
    ) -> Result<Candidate> {
        let now = DateTime::now();
        let candidate = Candidate {
            id: candidate::Id::new(),
            forename: draft.forename.clone(),
            surname: draft.surname.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            notes: draft.notes.clone(),
            consultant: draft.consultant.and_then(|r| r.into_target()),
            status: draft.status.key().clone(),
            role: draft.role.key().clone(),
            created_by: Some(*draft.created_by.key()),
            updated_by: Some(*draft.updated_by.key()),
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };
        let mut state = self.state();
        state.writes.push("insert candidate");
        state.candidate_drafts.push(draft);
        state.candidates.push(candidate.clone());
        Ok(candidate)
    }
}

impl Database<Update<write::candidate::Changes>> for Mock {
    type Ok = Candidate;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(changes): Update<write::candidate::Changes>,
    ) -> Result<Candidate> {
        let mut state = self.state();
        state.writes.push("update candidate");
        state.candidate_changes.push(changes.clone());
        let candidate = state
            .candidates
            .iter_mut()
            .find(|c| c.id == changes.id)
            .expect("locked and checked before update");
        let write::candidate::Changes {
            id: _,
            forename,
            surname,
            email,
            phone,
            notes,
            consultant,
            status,
            role,
            updated_by,
        } = changes;
        if let Some(forename) = forename {
            candidate.forename = forename;
        }
        if let Some(surname) = surname {
            candidate.surname = surname;
        }
        if let Some(email) = email {
            candidate.email = email;
        }
        if let Some(phone) = phone {
            candidate.phone = phone;
        }
        if let Some(notes) = notes {
            candidate.notes = notes;
        }
        candidate.consultant = consultant.into_target();
        if let Some(status) = status {
            candidate.status = status.into_key();
        }
        if let Some(role) = role {
            candidate.role = role.into_key();
        }
        candidate.updated_by = Some(updated_by.into_key());
        candidate.updated_at = DateTime::now().coerce();
        Ok(candidate.clone())
    }
}

impl Database<Delete<By<Candidate, candidate::Id>>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Candidate, candidate::Id>>,
    ) -> Result<()> {
        let id = by.into_inner();
        let mut state = self.state();
        state.writes.push("delete candidate");
        state.candidates.retain(|c| c.id != id);
        state.bookings.retain(|b| b.candidate != id);
        Ok(())
    }
}

impl Database<Select<By<Option<Company>, company::Id>>> for Mock {
    type Ok = Option<Company>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Company>, company::Id>>,
    ) -> Result<Option<Company>> {
        let id = by.into_inner();
        Ok(self.state().companies.iter().find(|c| c.id == id).cloned())
    }
}

impl Database<Insert<write::company::Draft>> for Mock {
    type Ok = Company;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<write::company::Draft>,
    ) -> Result<Company> {
        let now = DateTime::now();
        let company = Company {
            id: company::Id::new(),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            website: draft.website,
            notes: draft.notes,
            consultant: draft.consultant.and_then(|r| r.into_target()),
            status: draft.status.into_key(),
            business_type: draft.business_type.into_key(),
            created_by: Some(draft.created_by.into_key()),
            updated_by: Some(draft.updated_by.into_key()),
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };
        let mut state = self.state();
        state.writes.push("insert company");
        state.companies.push(company.clone());
        Ok(company)
    }
}

impl Database<Update<write::company::Changes>> for Mock {
    type Ok = Company;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(changes): Update<write::company::Changes>,
    ) -> Result<Company> {
        let mut state = self.state();
        state.writes.push("update company");
        state.company_changes.push(changes.clone());
        let company = state
            .companies
            .iter_mut()
            .find(|c| c.id == changes.id)
            .expect("locked and checked before update");
        let write::company::Changes {
            id: _,
            name,
            email,
            phone,
            website,
            notes,
            consultant,
            status,
            business_type,
            updated_by,
        } = changes;
        if let Some(name) = name {
            company.name = name;
        }
        if let Some(email) = email {
            company.email = email;
        }
        if let Some(phone) = phone {
            company.phone = phone;
        }
        if let Some(website) = website {
            company.website = website;
        }
        if let Some(notes) = notes {
            company.notes = notes;
        }
        company.consultant = consultant.into_target();
        if let Some(status) = status {
            company.status = status.into_key();
        }
        if let Some(business_type) = business_type {
            company.business_type = business_type.into_key();
        }
        company.updated_by = Some(updated_by.into_key());
        company.updated_at = DateTime::now().coerce();
        Ok(company.clone())
    }
}

impl Database<Delete<By<Company, company::Id>>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Company, company::Id>>,
    ) -> Result<()> {
        let id = by.into_inner();
        let mut state = self.state();
        state.writes.push("delete company");
        state.companies.retain(|c| c.id != id);
        state.bookings.retain(|b| b.company != id);
        Ok(())
    }
}

impl Database<Select<By<Option<Booking>, booking::Id>>> for Mock {
    type Ok = Option<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Booking>, booking::Id>>,
    ) -> Result<Option<Booking>> {
        let id = by.into_inner();
        Ok(self.state().bookings.iter().find(|b| b.id == id).cloned())
    }
}

impl
    Database<
        Select<By<read::booking::list::Page, read::booking::list::Selector>>,
    > for Mock
{
    type Ok = read::booking::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::booking::list::Page, read::booking::list::Selector>,
        >,
    ) -> Result<read::booking::list::Page> {
        let filter = by.into_inner().filter;
        Ok(self
            .state()
            .bookings
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect())
    }
}

impl Database<Insert<write::booking::Draft>> for Mock {
    type Ok = Booking;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<write::booking::Draft>,
    ) -> Result<Booking> {
        let now = DateTime::now();
        let booking = Booking {
            id: booking::Id::new(),
            date: draft.date,
            candidate: draft.candidate.into_key(),
            company: draft.company.into_key(),
            role: draft.role.into_key(),
            notes: draft.notes,
            created_by: Some(draft.created_by.into_key()),
            updated_by: Some(draft.updated_by.into_key()),
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };
        let mut state = self.state();
        state.writes.push("insert booking");
        state.bookings.push(booking.clone());
        Ok(booking)
    }
}

impl Database<Update<write::booking::Changes>> for Mock {
    type Ok = Booking;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(changes): Update<write::booking::Changes>,
    ) -> Result<Booking> {
        let mut state = self.state();
        state.writes.push("update booking");
        let booking = state
            .bookings
            .iter_mut()
            .find(|b| b.id == changes.id)
            .expect("locked and checked before update");
        let write::booking::Changes {
            id: _,
            date,
            candidate,
            company,
            role,
            notes,
            updated_by,
        } = changes;
        if let Some(date) = date {
            booking.date = date;
        }
        if let Some(candidate) = candidate {
            booking.candidate = candidate.into_key();
        }
        if let Some(company) = company {
            booking.company = company.into_key();
        }
        if let Some(role) = role {
            booking.role = role.into_key();
        }
        if let Some(notes) = notes {
            booking.notes = notes;
        }
        booking.updated_by = Some(updated_by.into_key());
        booking.updated_at = DateTime::now().coerce();
        Ok(booking.clone())
    }
}

impl Database<Delete<By<Booking, booking::Id>>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Booking, booking::Id>>,
    ) -> Result<()> {
        let id = by.into_inner();
        let mut state = self.state();
        state.writes.push("delete booking");
        state.bookings.retain(|b| b.id != id);
        Ok(())
    }
}

impl<K: Kind> Database<Select<By<Option<Code<K>>, code::Id>>> for Mock {
    type Ok = Option<Code<K>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Code<K>>, code::Id>>,
    ) -> Result<Option<Code<K>>> {
        let id = by.into_inner();
        Ok(self
            .state()
            .codes
            .iter()
            .find(|c| c.kind == K::NAME && c.id == id)
            .map(StoredCode::typed))
    }
}

impl<K: Kind> Database<Select<By<Option<Code<K>>, ShortCode>>> for Mock {
    type Ok = Option<Code<K>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Code<K>>, ShortCode>>,
    ) -> Result<Option<Code<K>>> {
        let short_code = by.into_inner();
        Ok(self
            .state()
            .codes
            .iter()
            .find(|c| c.kind == K::NAME && c.short_code == short_code)
            .map(StoredCode::typed))
    }
}

impl<K: Kind> Database<Insert<write::code::Draft<K>>> for Mock {
    type Ok = Code<K>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<write::code::Draft<K>>,
    ) -> Result<Code<K>> {
        let code = StoredCode {
            kind: K::NAME,
            id: code::Id::new(),
            short_code: draft.short_code,
            description: draft.description,
        };
        let mut state = self.state();
        state.writes.push("insert code");
        state.codes.push(code.clone());
        Ok(code.typed())
    }
}

impl<K: Kind> Database<Update<write::code::Changes<K>>> for Mock {
    type Ok = Code<K>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(changes): Update<write::code::Changes<K>>,
    ) -> Result<Code<K>> {
        let mut state = self.state();
        state.writes.push("update code");
        let code = state
            .codes
            .iter_mut()
            .find(|c| c.kind == K::NAME && c.id == changes.id)
            .expect("locked and checked before update");
        code.short_code = changes.short_code;
        code.description = changes.description;
        Ok(code.typed())
    }
}

impl<K: Kind> Database<Delete<By<Code<K>, code::Id>>> for Mock {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Code<K>, code::Id>>,
    ) -> Result<()> {
        let id = by.into_inner();
        let mut state = self.state();
        state.writes.push("delete code");
        state.codes.retain(|c| !(c.kind == K::NAME && c.id == id));
        Ok(())
    }
}
