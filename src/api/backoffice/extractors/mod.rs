/*!
 * Back office user extractor
 *
 * Public API:
 * - BackOfficeUser
 */

mod back_office_user;

pub use back_office_user::BackOfficeUser;
