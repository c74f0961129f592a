#![allow(dead_code)]

use lunar_ast::block::Chunk;
use lunar_ast::statements::StmtKind;
use lunar_ast_parsing::parse;
use lunar_tokens::token::Token;

/// Sample program touching every statement form
pub const PROGRAM: &str = r#"-- sample program
local Account = {}
Account.__index = Account

--[[ constructor
     for accounts ]]
function Account.new(owner, balance)
  local self = { owner = owner, balance = balance or 0 }
  return self
end

function Account:deposit(amount)
  if amount <= 0 then
    error("invalid amount")
  elseif amount > 1000 then
    self.flagged = true
  else
    self.balance = self.balance + amount
  end
end

local function sum(...)
  local total <const> = 0
  for i, v in ipairs({...}) do
    total = total + v
  end
  return total
end

for i = 10, 1, -1 do
  while i % 2 == 0 do i = i // 2 end
  repeat i = i - 1 until i < 0
  if i ~= nil then break end
end

local acct = Account.new('ann', 10)
acct:deposit(5)
print(sum(1, 2, 3) .. " total", #acct.owner)
"#;

pub fn tokenize(source: &str) -> Vec<Token> {
    lunar_ast_parsing::tokenize(source).unwrap_or_else(|e| panic!("{}", e.report(source)))
}

pub fn parse_ok(source: &str) -> Chunk {
    parse(source).unwrap_or_else(|e| panic!("{}", e.report(source)))
}

/// Parses a source that must contain exactly one statement and no return
pub fn single_statement(source: &str) -> StmtKind {
    let chunk = parse_ok(source);
    assert!(chunk.block.return_statement.is_none());
    let [stmt] = <[_; 1]>::try_from(chunk.block.statements)
        .unwrap_or_else(|stmts| panic!("expected one statement, got {stmts:#?}"));
    stmt.kind
}
