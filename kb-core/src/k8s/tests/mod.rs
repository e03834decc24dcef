
use assertables::*;
use kb_testutils::*;

use super::*;
