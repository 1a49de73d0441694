//! Built-in exercise templates
//!
//! Each template is a short Python program with a blank to fill in. The
//! blanks are deliberately not valid syntax so a template fails its smoke
//! run until the student repairs it.

use super::Exercise;

/// The static exercise catalog, fixed at build time.
pub(super) const TEMPLATES: &[Exercise] = &[
    Exercise {
        id: "prog1",
        template: r#"# Program 1
def add(x, lst=__):
    if lst is None:
        lst = []
    lst.append(x)
    return lst
print(add(1))
print(add(2))
"#,
    },
    Exercise {
        id: "prog2",
        template: r#"# Program 2
a = False
b = True
c = False
if a or b __ c:
    print("YES")
else:
    print("NO")
"#,
    },
    Exercise {
        id: "prog3",
        template: r#"# Program 3
def register_user(user, users=None):
    if users is None:
        users = []
 if user ____ in users:
        users.append(user)
 return users
print(register_user("Alice"))
print(register_user("Bob"))
"#,
    },
    Exercise {
        id: "prog4",
        template: r#"# Program 4
funcs = []
for i in range(3):
    funcs.append(lambda:___ )
for f in funcs:
    print(f())
"#,
    },
    Exercise {
        id: "prog5",
        template: r#"# Program 5
def make_funcs():
    return [lambda __: x for x in range(5)]
funcs = make_funcs()
print([f() for f in funcs])
"#,
    },
    Exercise {
        id: "prog6",
        template: r#"# Program 6
 x = 7
if x __ 2 == 1:
    print("Odd")
else:
    print("Even")
"#,
    },
    Exercise {
        id: "prog7",
        template: r#"# Program 7
funcs = []
for i in range(3):
    funcs.append(lambda:___ )
for f in funcs:
    print(f())
"#,
    },
    Exercise {
        id: "prog8",
        template: r#"# Program 8
for i in range(1, 6):
    if i == 4:
        ______
    print(i)
"#,
    },
    Exercise {
        id: "prog9",
        template: r#"# Program 9
def check_len(s):
    if len(s) >= 5:
        return "Long"
    return "Short"
_____________

"#,
    },
    Exercise {
        id: "prog10",
        template: r#"# Program 10
list = [1, 2, 3]
def total(items):
    return ___(items)
print(total(list))
"#,
    },
    Exercise {
        id: "prog11",
        template: r#"# Program 11
data = {"x": 10, "y": 20}
print(data.__("x"))
"#,
    },
    Exercise {
        id: "prog12",
        template: r#"# Program 12
try:
    num = int("12a")
¬¬_______  ValueError:
    num = 0
print(num)
"#,
    },
    Exercise {
        id: "prog13",
        template: r#"# Program 13
data = [1, 2, 2, 3, 4, 3]
result = []
for x in data:
    if x ___result:
        result.append(x)
print(result)
"#,
    },
    Exercise {
        id: "prog14",
        template: r#"# Program 14
nums = [2, 4, 6]
total = 0
for n in nums:
    total __ n
print(total)
"#,
    },
    Exercise {
        id: "prog15",
        template: r#"# Program 15
x = 10
def change():
    __ x
    x += 5
change()
print(x)
"#,
    },
];
