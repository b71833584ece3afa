// autopts-pbp Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

pub mod flag;

#[cfg(test)]
pub(crate) mod testing;
