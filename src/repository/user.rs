use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sql_types::Text;

use crate::domain::types::{UserId, Username};
use crate::domain::user::{NewUser, User};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::{DieselRepository, RepositoryResult, UserReader, UserWriter};

diesel::define_sql_function!(fn lower(x: Text) -> Text);

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .find(id.get())
            .first::<DbUser>(&mut conn)
            .optional()?;

        let user = user.map(TryInto::try_into).transpose()?;
        Ok(user)
    }

    fn get_user_credentials(
        &self,
        username: &Username,
    ) -> RepositoryResult<Option<(User, String)>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::username.eq(username.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        match user {
            Some(user) => {
                let password_hash = user.password_hash.clone();
                Ok(Some((user.try_into()?, password_hash)))
            }
            None => Ok(None),
        }
    }

    fn username_taken(&self, username: &Username) -> RepositoryResult<bool> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        // SQLite's lower() only folds ASCII.
        let folded = username.as_str().to_ascii_lowercase();
        let taken = diesel::select(exists(
            users::table.filter(lower(users::username).eq(folded)),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(taken)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let row = diesel::insert_into(users::table)
            .values(DbNewUser::from(user))
            .get_result::<DbUser>(&mut conn)?;

        Ok(row.try_into()?)
    }

    fn delete_user(&self, id: UserId) -> RepositoryResult<usize> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let affected = diesel::delete(users::table.find(id.get())).execute(&mut conn)?;

        Ok(affected)
    }
}
